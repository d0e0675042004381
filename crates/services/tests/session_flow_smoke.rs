//! End-to-end smoke run of one session over in-memory hosts: enter a
//! tiered practice, play ambient sound through a loop restart, narrate the
//! guide, accumulate ticks, and conclude into a navigation hand-off.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use sadhana_core::model::{AmbientTrack, Proficiency};
use sadhana_core::time::fixed_clock;
use sadhana_core::timing::TimerMode;
use services::{
    AudioHandle, AudioHost, AudioHostError, CompletionHook, NarrationEvents, NavigationRequest,
    Navigator, SessionPayload, SessionRuntime, SpeechHost, SpeechHostError, TrackState,
};

#[derive(Default)]
struct SmokeHandle {
    plays: Mutex<usize>,
    hook: Mutex<Option<CompletionHook>>,
}

impl SmokeHandle {
    fn finish_playback(&self) {
        let hook = self.hook.lock().unwrap().take();
        if let Some(hook) = hook {
            hook();
        }
    }
}

impl AudioHandle for SmokeHandle {
    fn play(&self) -> Result<(), AudioHostError> {
        *self.plays.lock().unwrap() += 1;
        Ok(())
    }

    fn stop(&self) -> Result<(), AudioHostError> {
        Ok(())
    }

    fn on_completion(&self, hook: CompletionHook) {
        *self.hook.lock().unwrap() = Some(hook);
    }
}

#[derive(Default)]
struct SmokeAudioHost {
    handles: Mutex<Vec<(AmbientTrack, Arc<SmokeHandle>)>>,
}

impl SmokeAudioHost {
    fn handle(&self, track: AmbientTrack) -> Arc<SmokeHandle> {
        self.handles
            .lock()
            .unwrap()
            .iter()
            .find(|(candidate, _)| *candidate == track)
            .map(|(_, handle)| Arc::clone(handle))
            .expect("track loaded")
    }
}

#[async_trait]
impl AudioHost for SmokeAudioHost {
    async fn load(&self, track: AmbientTrack) -> Result<Arc<dyn AudioHandle>, AudioHostError> {
        let handle = Arc::new(SmokeHandle::default());
        self.handles
            .lock()
            .unwrap()
            .push((track, Arc::clone(&handle)));
        Ok(handle)
    }
}

#[derive(Default)]
struct SmokeSpeechHost {
    utterances: Mutex<Vec<String>>,
}

impl SpeechHost for SmokeSpeechHost {
    fn speak(&self, text: &str, _rate: f32, events: NarrationEvents) -> Result<(), SpeechHostError> {
        self.utterances.lock().unwrap().push(text.to_string());
        (events.on_start)();
        Ok(())
    }

    fn stop(&self) -> Result<(), SpeechHostError> {
        Ok(())
    }
}

#[derive(Default)]
struct SmokeNavigator {
    requests: Mutex<Vec<NavigationRequest>>,
}

impl Navigator for SmokeNavigator {
    fn navigate(&self, request: NavigationRequest) {
        self.requests.lock().unwrap().push(request);
    }
}

#[tokio::test]
async fn full_session_flow_concludes_with_summary_hand_off() {
    let audio = Arc::new(SmokeAudioHost::default());
    let speech = Arc::new(SmokeSpeechHost::default());
    let navigator = Arc::new(SmokeNavigator::default());

    let runtime = SessionRuntime::new(
        fixed_clock(),
        Arc::clone(&audio) as Arc<dyn AudioHost>,
        Arc::clone(&speech) as Arc<dyn SpeechHost>,
        Arc::clone(&navigator) as Arc<dyn Navigator>,
        0.9,
    );

    let payload = SessionPayload {
        title: "Hatha Yoga".into(),
        proficiency: Some(Proficiency::Intermediate),
    };
    let mut session = runtime.start_session(&payload).await.unwrap();

    // Intermediate Hatha Yoga runs as a 20-minute countdown.
    assert_eq!(
        session.timer_mode(),
        TimerMode::Countdown(Duration::from_secs(1200))
    );

    // Ambient sound: toggle a track on and ride one natural loop restart.
    assert_eq!(
        runtime.toggle_sound(AmbientTrack::Rain).unwrap(),
        TrackState::Active
    );
    let rain = audio.handle(AmbientTrack::Rain);
    rain.finish_playback();
    assert_eq!(*rain.plays.lock().unwrap(), 2);
    assert!(runtime.sound_state(AmbientTrack::Rain) == TrackState::Active);

    // Narration reads the guide steps as one utterance.
    assert!(runtime.toggle_narration(&session).unwrap());
    {
        let utterances = speech.utterances.lock().unwrap();
        assert_eq!(utterances.len(), 1);
        assert!(utterances[0].contains("Enter each posture slowly"));
    }

    // The widget feeds elapsed time in.
    runtime
        .record_tick(&mut session, Duration::from_millis(100))
        .unwrap();
    runtime
        .record_tick(&mut session, Duration::from_secs(95))
        .unwrap();

    let summary = runtime.conclude(&mut session).unwrap();
    assert_eq!(summary.practice_title(), "Hatha Yoga");
    assert_eq!(summary.elapsed(), Duration::from_secs(95));

    // Side effects are fully released and the hand-off happened once.
    assert!(runtime.active_sounds().is_empty());
    assert!(!runtime.is_narrating());
    let requests = navigator.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    match &requests[0] {
        NavigationRequest::Conclude(payload) => {
            assert_eq!(payload.summary, summary);
        }
        other => panic!("unexpected request: {other:?}"),
    }

    // A stale loop completion from before the conclusion stays silent.
    rain.finish_playback();
    assert_eq!(*rain.plays.lock().unwrap(), 2);
}
