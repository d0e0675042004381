//! The practice reference catalog.
//!
//! All static lookup data lives here: religion membership, descriptions,
//! practice-type labels, and step guides, keyed by practice title. The
//! tables are compiled in as `phf` maps and never mutated. Screens read
//! them through the typed accessors below; a missing entry degrades to a
//! sentinel or an empty default, never a panic.

use phf::phf_map;

use crate::model::{GuideStep, Practice, Religion};
use crate::timing::classify;

// ─── Religion membership ───────────────────────────────────────────────────────

static RELIGIONS: phf::Map<&'static str, Religion> = phf_map! {
    "Lectio Divina" => Religion::Christianity,
    "Christian Meditation" => Religion::Christianity,
    "Examen" => Religion::Christianity,
    "Rosary" => Religion::Christianity,
    "Taffakur" => Religion::Islam,
    "Dhikr" => Religion::Islam,
    "Muraqaba" => Religion::Islam,
    "Sufi Breathing" => Religion::Islam,
    "Hatha Yoga" => Religion::Hinduism,
    "Kriya Yoga" => Religion::Hinduism,
    "Chakra" => Religion::Hinduism,
    "Breath" => Religion::Buddhism,
    "Walk" => Religion::Buddhism,
    "Tonglen" => Religion::Buddhism,
    "Metta" => Religion::Buddhism,
    "Body Scan" => Religion::Buddhism,
    "Hitbodedut" => Religion::Judaism,
    "Kabbalistic/Chassidic" => Religion::Judaism,
    "Shema" => Religion::Judaism,
};

/// Library display order within each tradition.
static CHRISTIANITY: &[&str] = &["Lectio Divina", "Christian Meditation", "Examen", "Rosary"];
static ISLAM: &[&str] = &["Taffakur", "Dhikr", "Muraqaba", "Sufi Breathing"];
static HINDUISM: &[&str] = &["Hatha Yoga", "Kriya Yoga", "Chakra"];
static BUDDHISM: &[&str] = &["Breath", "Walk", "Tonglen", "Metta", "Body Scan"];
static JUDAISM: &[&str] = &["Hitbodedut", "Kabbalistic/Chassidic", "Shema"];

// ─── Descriptions ──────────────────────────────────────────────────────────────

static DESCRIPTIONS: phf::Map<&'static str, &'static str> = phf_map! {
    "Lectio Divina" => "A slow, prayerful reading of scripture in four movements, \
        letting a short passage unfold into reflection, prayer, and rest in God.",
    "Christian Meditation" => "Silent prayer built on the continuous repetition of a \
        single sacred word, traditionally maranatha, to still the wandering mind.",
    "Examen" => "A structured evening review of the day with gratitude, noticing \
        where grace was present and where attention slipped away.",
    "Rosary" => "A devotional cycle of prayers counted on beads, pairing spoken \
        repetition with contemplation of scenes from the life of Christ.",
    "Taffakur" => "Deliberate reflection on creation and on one's own life as signs \
        pointing back to the Creator.",
    "Dhikr" => "The rhythmic remembrance of God through repeated short phrases, \
        spoken aloud or silently, until the remembrance carries itself.",
    "Muraqaba" => "Sufi watchfulness: sitting in stillness with the awareness that \
        one is seen by God, and keeping the heart turned toward that presence.",
    "Sufi Breathing" => "Breath practice that ties each inhale and exhale to the \
        remembrance of the divine name.",
    "Hatha Yoga" => "Postures and breath held in steady attention, preparing body \
        and mind for deeper meditation.",
    "Kriya Yoga" => "An energetic breathing discipline circulating attention along \
        the spine, taught in a fixed sequence of techniques.",
    "Chakra" => "Visualization moving attention through the body's energy centers \
        in turn, resting at each with its color and quality.",
    "Breath" => "Anapanasati: resting attention on the natural breath, noticing \
        when the mind wanders and returning without judgment.",
    "Walk" => "Walking meditation: slow, deliberate steps with attention in the \
        soles of the feet, the pace matched to the breath.",
    "Tonglen" => "Taking and sending: breathing in the suffering of others, \
        breathing out relief and ease, reversing the usual instinct of aversion.",
    "Metta" => "Loving-kindness practice: repeating phrases of goodwill for \
        oneself, a friend, a stranger, a difficult person, and all beings.",
    "Body Scan" => "A patient sweep of attention from crown to toes, meeting each \
        region of the body as it is.",
    "Hitbodedut" => "Unstructured, spoken conversation with God in one's own \
        words, traditionally alone and outdoors.",
    "Kabbalistic/Chassidic" => "Contemplation of the divine names and the \
        unfolding of the worlds, joining study and inner visualization.",
    "Shema" => "Meditative recitation of the Shema, dwelling on the unity of God \
        with each word of the verse.",
};

// ─── Practice-type labels ──────────────────────────────────────────────────────

static TYPE_LABELS: phf::Map<&'static str, &'static str> = phf_map! {
    "Lectio Divina" => "Scriptural, Contemplative",
    "Christian Meditation" => "Mantra, Contemplative",
    "Examen" => "Reflective",
    "Rosary" => "Devotional, Mantra",
    "Taffakur" => "Reflective, Contemplative",
    "Dhikr" => "Mantra, Devotional",
    "Muraqaba" => "Contemplative",
    "Sufi Breathing" => "Breathing",
    "Hatha Yoga" => "Movement, Posture",
    "Kriya Yoga" => "Breathing, Movement",
    "Chakra" => "Visualization",
    "Breath" => "Breathing, Mindfulness",
    "Walk" => "Movement, Mindfulness",
    "Tonglen" => "Compassion, Visualization",
    "Metta" => "Compassion, Mantra",
    "Body Scan" => "Mindfulness",
    "Hitbodedut" => "Reflective, Devotional",
    "Kabbalistic/Chassidic" => "Contemplative, Visualization",
    "Shema" => "Scriptural, Mantra",
};

// ─── Step guides ───────────────────────────────────────────────────────────────

static GUIDES: phf::Map<&'static str, &'static [GuideStep]> = phf_map! {
    "Lectio Divina" => &[
        GuideStep::new("Read", "Read a short passage of scripture slowly, twice, \
            listening for a word or phrase that stands out."),
        GuideStep::new("Reflect", "Stay with the phrase that caught you. Turn it \
            over without forcing a conclusion."),
        GuideStep::new("Respond", "Answer in prayer, speaking to God about what \
            the passage stirred up."),
        GuideStep::new("Rest", "Let words fall away and rest quietly in God's \
            presence until the time closes."),
    ],
    "Christian Meditation" => &[
        GuideStep::new("Settle", "Sit upright and still, eyes lightly closed, \
            hands resting in your lap."),
        GuideStep::new("Recite", "Begin repeating your prayer word, maranatha, \
            silently and without haste, in four equal syllables."),
        GuideStep::new("Return", "When thoughts or images pull you away, return \
            to the word without commentary."),
        GuideStep::new("Close", "End by sitting in silence for a minute before \
            opening your eyes."),
    ],
    "Examen" => &[
        GuideStep::new("Give thanks", "Recall the day and name what you are \
            grateful for, however small."),
        GuideStep::new("Review", "Walk through the day hour by hour, noticing \
            where you acted with love and where you did not."),
        GuideStep::new("Sorrow", "Hold what you regret honestly, without \
            excusing or condemning yourself."),
        GuideStep::new("Forgive", "Ask for forgiveness and extend it to anyone \
            who wronged you today."),
        GuideStep::new("Resolve", "Look to tomorrow and ask for the grace you \
            will need."),
    ],
    "Rosary" => &[
        GuideStep::new("Open", "Hold the crucifix and pray the opening prayers \
            unhurried."),
        GuideStep::new("Announce", "Name the mystery for this decade and hold \
            its scene in your mind."),
        GuideStep::new("Pray the decade", "Count the ten beads through your \
            fingers, one prayer per bead, keeping the scene before you."),
        GuideStep::new("Conclude", "Close the decade, and the rosary, with the \
            customary prayers."),
    ],
    "Taffakur" => &[
        GuideStep::new("Choose a sign", "Pick one thing to reflect on: a verse, \
            a part of creation, an event of your day."),
        GuideStep::new("Contemplate", "Ask what it shows about the Creator, and \
            follow the thought patiently."),
        GuideStep::new("Turn inward", "Ask what it asks of you, and what in \
            your life should change."),
        GuideStep::new("Give thanks", "End with gratitude for what was shown."),
    ],
    "Dhikr" => &[
        GuideStep::new("Settle", "Sit facing the qibla if you can, and quiet \
            the body."),
        GuideStep::new("Recite", "Repeat the chosen phrase of remembrance \
            steadily, aloud or under the breath."),
        GuideStep::new("Descend", "Let the phrase sink from the tongue into \
            the heart, until it repeats itself."),
    ],
    "Muraqaba" => &[
        GuideStep::new("Sit", "Sit still, lower or close the eyes, and gather \
            your attention."),
        GuideStep::new("Watch", "Hold the awareness that God watches you, \
            though you do not see Him."),
        GuideStep::new("Remain", "Whenever the mind drifts, return to that \
            watchfulness without strain."),
    ],
    "Sufi Breathing" => &[
        GuideStep::new("Posture", "Sit with a straight back and loosen the \
            shoulders."),
        GuideStep::new("Inhale", "Breathe in slowly through the nose, joining \
            the inhale to the remembrance of the divine name."),
        GuideStep::new("Exhale", "Release the breath fully, letting the \
            remembrance go out with it."),
        GuideStep::new("Continue", "Keep the cycle even and unforced, breath \
            and remembrance as one movement."),
    ],
    "Hatha Yoga" => &[
        GuideStep::new("Center", "Stand or sit quietly and take several full \
            breaths before the first posture."),
        GuideStep::new("Move", "Enter each posture slowly, holding it with \
            steady breath and relaxed effort."),
        GuideStep::new("Breathe", "Keep the breath even throughout; where the \
            body resists, soften rather than push."),
        GuideStep::new("Rest", "Finish lying still, letting the effects of the \
            practice settle."),
    ],
    "Kriya Yoga" => &[
        GuideStep::new("Prepare", "Sit upright, spine free, and calm the breath \
            with a few even cycles."),
        GuideStep::new("Circulate", "Draw the breath up the spine on the \
            inhale and down on the exhale, attention traveling with it."),
        GuideStep::new("Deepen", "Let the cycles grow quieter and longer \
            without strain."),
        GuideStep::new("Sit", "End in silent stillness, attention at the point \
            between the eyebrows."),
    ],
    "Chakra" => &[
        GuideStep::new("Ground", "Bring attention to the base of the spine and \
            picture its deep red center glowing steadily."),
        GuideStep::new("Ascend", "Move attention upward center by center, \
            resting at each with its color until it comes alive."),
        GuideStep::new("Crown", "Rest at the crown of the head, holding the \
            whole column of light at once."),
        GuideStep::new("Return", "Descend gently back to the base and open \
            your eyes."),
    ],
    "Breath" => &[
        GuideStep::new("Settle", "Sit comfortably, close the eyes, and let the \
            breath be as it is."),
        GuideStep::new("Attend", "Rest attention where the breath is clearest: \
            nostrils, chest, or belly."),
        GuideStep::new("Return", "When you notice the mind elsewhere, note it \
            kindly and come back to the breath."),
    ],
    "Walk" => &[
        GuideStep::new("Stand", "Stand still and feel the weight of the body \
            through the feet."),
        GuideStep::new("Step", "Walk slowly, attending to lifting, moving, and \
            placing each foot."),
        GuideStep::new("Turn", "At the end of your path, pause, turn with \
            attention, and continue."),
    ],
    "Tonglen" => &[
        GuideStep::new("Flash openness", "Rest a moment in open stillness \
            before beginning."),
        GuideStep::new("Breathe in", "Breathe in the pain of someone you care \
            about, as heavy, hot, and dark."),
        GuideStep::new("Breathe out", "Breathe out relief toward them, as \
            light, cool, and bright."),
        GuideStep::new("Widen", "Extend the practice outward, from this person \
            to all beings who suffer the same way."),
    ],
    "Metta" => &[
        GuideStep::new("Yourself", "Repeat slowly: may I be safe, may I be \
            well, may I live with ease."),
        GuideStep::new("A friend", "Bring a loved one to mind and offer them \
            the same phrases."),
        GuideStep::new("A stranger", "Offer the phrases to someone you neither \
            like nor dislike."),
        GuideStep::new("A difficult person", "Offer the phrases to someone who \
            is hard for you, as far as you honestly can."),
        GuideStep::new("All beings", "Let the phrases widen out to all beings \
            everywhere, without exception."),
    ],
    "Body Scan" => &[
        GuideStep::new("Lie down", "Lie on your back, arms at your sides, and \
            take three slow breaths."),
        GuideStep::new("Sweep", "Move attention gradually from the crown of \
            the head downward, region by region."),
        GuideStep::new("Meet sensation", "Whatever you find, tension, warmth, \
            numbness, let it be as it is and move on."),
        GuideStep::new("Whole body", "End by holding the whole body in \
            awareness at once."),
    ],
    "Hitbodedut" => &[
        GuideStep::new("Withdraw", "Find a place where you can be alone and \
            undisturbed, outdoors if possible."),
        GuideStep::new("Speak", "Talk to God plainly in your own words, about \
            whatever is truly on your heart."),
        GuideStep::new("Persist", "If words run out, say so, and stay; the \
            silence is part of the conversation."),
    ],
    "Kabbalistic/Chassidic" => &[
        GuideStep::new("Prepare", "Settle the body and recall before whom you \
            stand."),
        GuideStep::new("Contemplate", "Take one divine name or teaching and \
            unfold its meaning in the mind."),
        GuideStep::new("Visualize", "Hold the letters before the inner eye, \
            ascending with them from world to world."),
        GuideStep::new("Bind", "Bind the heart to what the mind has seen, and \
            close in gratitude."),
    ],
    "Shema" => &[
        GuideStep::new("Compose", "Close or cover the eyes and collect your \
            attention."),
        GuideStep::new("Recite", "Say the Shema slowly, one word at a time, \
            hearing what each word declares."),
        GuideStep::new("Dwell", "Rest on the oneness the verse proclaims, \
            letting it fill the silence after the words."),
    ],
};

// ─── Typed accessors ───────────────────────────────────────────────────────────

/// Religion a practice belongs to; `Religion::Unknown` for unmapped titles.
#[must_use]
pub fn religion_for(title: &str) -> Religion {
    RELIGIONS.get(title).copied().unwrap_or(Religion::Unknown)
}

#[must_use]
pub fn description_for(title: &str) -> Option<&'static str> {
    DESCRIPTIONS.get(title).copied()
}

#[must_use]
pub fn type_label_for(title: &str) -> Option<&'static str> {
    TYPE_LABELS.get(title).copied()
}

/// Ordered step guide for a practice; empty when no guide is mapped.
#[must_use]
pub fn guide_for(title: &str) -> &'static [GuideStep] {
    GUIDES.get(title).copied().unwrap_or(&[])
}

/// Titles for one tradition, in library display order.
#[must_use]
pub fn practices_for(religion: Religion) -> &'static [&'static str] {
    match religion {
        Religion::Christianity => CHRISTIANITY,
        Religion::Islam => ISLAM,
        Religion::Hinduism => HINDUISM,
        Religion::Buddhism => BUDDHISM,
        Religion::Judaism => JUDAISM,
        Religion::Unknown => &[],
    }
}

/// All catalog titles, grouped by tradition in library display order.
pub fn all_titles() -> impl Iterator<Item = &'static str> {
    Religion::ALL
        .into_iter()
        .flat_map(|religion| practices_for(religion).iter().copied())
}

/// Assemble the full session-screen view of one practice.
///
/// Unknown titles still resolve: religion falls back to the sentinel, the
/// description to an empty string, and the guide to no steps, so a screen
/// handed a bad title renders instead of crashing.
#[must_use]
pub fn resolve(title: &str) -> Practice {
    Practice::new(
        title,
        religion_for(title),
        description_for(title).unwrap_or(""),
        type_label_for(title).unwrap_or(""),
        guide_for(title),
        classify(title),
    )
}

/// Other practices sharing at least one type label with `title`, in library
/// order. Labels are compared per comma-separated entry, so a
/// "Mantra, Devotional" practice relates to anything tagged "Mantra" or
/// "Devotional".
#[must_use]
pub fn related_by_type(title: &str) -> Vec<&'static str> {
    let Some(own_label) = type_label_for(title) else {
        return Vec::new();
    };
    let own: Vec<&str> = split_labels(own_label).collect();

    all_titles()
        .filter(|candidate| *candidate != title)
        .filter(|candidate| {
            type_label_for(candidate)
                .map(|label| split_labels(label).any(|entry| own.contains(&entry)))
                .unwrap_or(false)
        })
        .collect()
}

fn split_labels(label: &str) -> impl Iterator<Item = &str> {
    label.split(',').map(str::trim).filter(|entry| !entry.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timing::TimingClass;

    #[test]
    fn every_title_is_fully_mapped() {
        for title in all_titles() {
            assert_ne!(religion_for(title), Religion::Unknown, "{title}");
            assert!(description_for(title).is_some(), "{title}");
            assert!(type_label_for(title).is_some(), "{title}");
            assert!(!guide_for(title).is_empty(), "{title}");
        }
    }

    #[test]
    fn catalog_has_nineteen_practices() {
        assert_eq!(all_titles().count(), 19);
        assert_eq!(RELIGIONS.len(), 19);
    }

    #[test]
    fn unknown_title_resolves_with_sentinels() {
        let practice = resolve("No Such Practice");
        assert_eq!(practice.religion(), Religion::Unknown);
        assert_eq!(practice.description(), "");
        assert!(practice.steps().is_empty());
        assert_eq!(practice.timing_class(), TimingClass::OpenEnded);
    }

    #[test]
    fn resolve_assembles_the_known_practice() {
        let practice = resolve("Metta");
        assert_eq!(practice.title(), "Metta");
        assert_eq!(practice.religion(), Religion::Buddhism);
        assert_eq!(practice.timing_class(), TimingClass::Tiered);
        assert!(practice.offers_proficiency());
        assert_eq!(practice.steps().len(), 5);
        assert_eq!(practice.steps()[0].prompt(), "Yourself");
    }

    #[test]
    fn ordered_lists_agree_with_the_religion_table() {
        for religion in Religion::ALL {
            for title in practices_for(religion) {
                assert_eq!(religion_for(title), religion, "{title}");
            }
        }
    }

    #[test]
    fn related_by_type_shares_a_label_and_excludes_self() {
        let related = related_by_type("Dhikr");
        assert!(!related.contains(&"Dhikr"));
        // "Mantra, Devotional" → every mantra and devotional practice.
        assert!(related.contains(&"Christian Meditation"));
        assert!(related.contains(&"Rosary"));
        assert!(related.contains(&"Metta"));
        assert!(!related.contains(&"Body Scan"));
    }

    #[test]
    fn related_by_type_of_unknown_title_is_empty() {
        assert!(related_by_type("No Such Practice").is_empty());
    }
}
