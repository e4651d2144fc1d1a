//! The per-frame pipeline and the capture → process → show loop.
//!
//! [`Pipeline`] owns the detector and the mixer; [`run_loop`] borrows a
//! camera and a display surface and drives frames through it until capture
//! fails or the surface asks to quit.  Nothing survives from one frame to the
//! next.

use hand_landmarks::HandDetector;
use log::{debug, info};
use volume_map::{DistanceMap, VolumeControl, VolumeLevel};

use crate::camera::FrameSource;
use crate::error::Result;
use crate::frame::Frame;
use crate::overlay;
use crate::viewer::Surface;

/// What one frame with a hand in it measured and applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReading {
    pub distance: f64,
    pub volume:   VolumeLevel,
    /// Level handed to the mixer, in its native units.
    pub native:   f32,
}

pub struct Pipeline {
    detector:       Box<dyn HandDetector>,
    volume:         Box<dyn VolumeControl>,
    map:            DistanceMap,
    hand_index:     usize,
    draw_landmarks: bool,
}

impl Pipeline {
    pub fn new(
        detector:       Box<dyn HandDetector>,
        volume:         Box<dyn VolumeControl>,
        map:            DistanceMap,
        hand_index:     usize,
        draw_landmarks: bool,
    ) -> Self {
        Pipeline { detector, volume, map, hand_index, draw_landmarks }
    }

    /// Detect, measure, set the volume, and annotate `frame` in place.
    ///
    /// `Ok(None)` when no hand is in view; the frame is left untouched and
    /// the mixer is not called.
    pub fn process_frame(&mut self, frame: &mut Frame) -> Result<Option<FrameReading>> {
        let hand = self.detector.find_hand_landmarks(frame.view(), self.hand_index)?;
        if hand.is_empty() {
            return Ok(None);
        }

        if self.draw_landmarks {
            overlay::draw_hand(frame, &hand);
        }

        let distance = hand.fingertip_distance()?;
        let volume   = self.map.volume_for(distance);
        let native   = self.volume.set_volume(volume)?;

        overlay::draw_readout(frame, distance, volume);
        debug!("distance={:.1}px volume={} native={:.2}", distance, volume, native);

        Ok(Some(FrameReading { distance, volume, native }))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run_loop
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitReason {
    /// The camera stopped delivering frames.
    CaptureEnded,
    /// Quit key or window close.
    QuitRequested,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunStats {
    pub frames:      u64,
    pub hand_frames: u64,
    pub exit:        ExitReason,
}

/// Drive frames until the camera fails or the surface asks to quit.
///
/// Any detector, mixer, or display error ends the loop and is returned.
pub fn run_loop(
    camera:   &mut dyn FrameSource,
    pipeline: &mut Pipeline,
    surface:  &mut dyn Surface,
) -> Result<RunStats> {
    let mut frames      = 0u64;
    let mut hand_frames = 0u64;

    let exit = loop {
        let Some(mut frame) = camera.read() else {
            info!("capture ended after {} frames", frames);
            break ExitReason::CaptureEnded;
        };
        frames += 1;

        if pipeline.process_frame(&mut frame)?.is_some() {
            hand_frames += 1;
        }

        surface.show(&frame)?;
        if surface.quit_requested() {
            info!("quit requested after {} frames", frames);
            break ExitReason::QuitRequested;
        }
    };

    Ok(RunStats { frames, hand_frames, exit })
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    use hand_landmarks::sim::synthetic_hand;
    use hand_landmarks::{
        DetectError, DetectorConfig, ImageView, Landmark, LandmarkError, LandmarkSet,
    };
    use volume_map::{NativeRange, VolumeError};

    use crate::error::AppError;
    use crate::overlay::{LANDMARK_COLOR, TEXT_COLOR};

    const BG: u32 = 0xFF000000;

    // ── fakes ─────────────────────────────────────────────────────────────

    /// Replays one scripted result per call; empty once exhausted.
    struct ScriptedDetector {
        script: VecDeque<std::result::Result<Vec<LandmarkSet>, DetectError>>,
        config: DetectorConfig,
    }

    impl ScriptedDetector {
        fn new(hands: Vec<LandmarkSet>) -> Self {
            ScriptedDetector {
                script: hands.into_iter().map(|h| Ok(vec![h])).collect(),
                config: DetectorConfig::default(),
            }
        }
    }

    impl HandDetector for ScriptedDetector {
        fn find_hands(
            &mut self,
            _image: ImageView<'_>,
        ) -> std::result::Result<Vec<LandmarkSet>, DetectError> {
            self.script.pop_front().unwrap_or(Ok(vec![]))
        }
        fn config(&self) -> &DetectorConfig { &self.config }
    }

    /// Records every native level it is given.
    #[derive(Clone, Default)]
    struct RecordingMixer {
        calls: Rc<RefCell<Vec<f32>>>,
        fail:  bool,
    }

    impl VolumeControl for RecordingMixer {
        fn range(&self) -> NativeRange { NativeRange::new(-65.25, 0.0) }
        fn set_native(&mut self, level: f32) -> std::result::Result<(), VolumeError> {
            if self.fail {
                return Err(VolumeError::RangeParse("Master".into()));
            }
            self.calls.borrow_mut().push(level);
            Ok(())
        }
    }

    struct FixedCamera { left: usize }

    impl FrameSource for FixedCamera {
        fn read(&mut self) -> Option<Frame> {
            if self.left == 0 { return None; }
            self.left -= 1;
            Some(Frame::new(640, 480, BG))
        }
    }

    /// Asks to quit after `quit_after` frames (never when `None`).
    struct CountingSurface {
        shown:      u64,
        quit_after: Option<u64>,
        last_ink:   bool,
    }

    impl Surface for CountingSurface {
        fn show(&mut self, frame: &Frame) -> Result<()> {
            self.shown += 1;
            self.last_ink = frame.pixels().iter().any(|&p| p != BG);
            Ok(())
        }
        fn quit_requested(&self) -> bool {
            self.quit_after.is_some_and(|n| self.shown >= n)
        }
    }

    fn tips(thumb: (i32, i32), index: (i32, i32)) -> LandmarkSet {
        let lms = (0..21u8)
            .map(|id| match id {
                4 => Landmark::new(4, thumb.0, thumb.1),
                8 => Landmark::new(8, index.0, index.1),
                _ => Landmark::new(id, 320, 400),
            })
            .collect();
        LandmarkSet::new(lms, 1.0)
    }

    fn pipeline_with(hands: Vec<LandmarkSet>, mixer: RecordingMixer) -> Pipeline {
        Pipeline::new(
            Box::new(ScriptedDetector::new(hands)),
            Box::new(mixer),
            DistanceMap::default(),
            0,
            true,
        )
    }

    // ── process_frame ─────────────────────────────────────────────────────

    #[test]
    fn closed_pinch_is_silent() {
        let mixer = RecordingMixer::default();
        let mut p = pipeline_with(vec![tips((100, 100), (100, 180))], mixer.clone());
        let mut f = Frame::new(640, 480, BG);
        let r = p.process_frame(&mut f).unwrap().unwrap();
        assert_eq!(r.distance, 80.0);
        assert_eq!(r.volume, VolumeLevel::SILENT);
        assert_eq!(*mixer.calls.borrow(), vec![-65.25]);
    }

    #[test]
    fn open_pinch_is_full() {
        let mixer = RecordingMixer::default();
        let mut p = pipeline_with(vec![tips((100, 100), (100, 350))], mixer.clone());
        let r = p.process_frame(&mut Frame::new(640, 480, BG)).unwrap().unwrap();
        assert_eq!(r.distance, 250.0);
        assert_eq!(r.volume, VolumeLevel::FULL);
        assert_eq!(r.native, 0.0);
    }

    #[test]
    fn midpoint_pinch_is_half() {
        let mut p = pipeline_with(vec![tips((0, 0), (0, 165))], RecordingMixer::default());
        let r = p.process_frame(&mut Frame::new(640, 480, BG)).unwrap().unwrap();
        assert_eq!(r.distance, 165.0);
        assert!((r.volume.percent() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn no_hand_skips_mixer_and_leaves_frame_raw() {
        let mixer = RecordingMixer::default();
        let mut p = pipeline_with(vec![LandmarkSet::empty()], mixer.clone());
        let mut f = Frame::new(640, 480, BG);
        assert_eq!(p.process_frame(&mut f).unwrap(), None);
        assert!(mixer.calls.borrow().is_empty());
        assert!(f.pixels().iter().all(|&px| px == BG));
    }

    #[test]
    fn hand_frame_gets_readout_and_skeleton() {
        let mut p = pipeline_with(vec![synthetic_hand(320, 240, 165)], RecordingMixer::default());
        let mut f = Frame::new(640, 480, BG);
        p.process_frame(&mut f).unwrap().unwrap();
        assert!(f.pixels().contains(&TEXT_COLOR));
        assert!(f.pixels().contains(&LANDMARK_COLOR));
    }

    #[test]
    fn annotation_can_be_disabled() {
        let mut p = Pipeline::new(
            Box::new(ScriptedDetector::new(vec![synthetic_hand(320, 240, 165)])),
            Box::new(RecordingMixer::default()),
            DistanceMap::default(),
            0,
            false,
        );
        let mut f = Frame::new(640, 480, BG);
        p.process_frame(&mut f).unwrap().unwrap();
        assert!(!f.pixels().contains(&LANDMARK_COLOR));
        assert!(f.pixels().contains(&TEXT_COLOR));
    }

    #[test]
    fn incomplete_hand_is_an_error() {
        let short = LandmarkSet::new((0..5u8).map(|id| Landmark::new(id, 0, 0)).collect(), 1.0);
        let mixer = RecordingMixer::default();
        let mut p = pipeline_with(vec![short], mixer.clone());
        let err = p.process_frame(&mut Frame::new(64, 64, BG)).unwrap_err();
        assert!(matches!(
            err,
            AppError::IncompleteHand(LandmarkError::Missing { id: 8, len: 5 })
        ));
        assert!(mixer.calls.borrow().is_empty());
    }

    #[test]
    fn detector_failure_propagates() {
        let det = ScriptedDetector {
            script: VecDeque::from([Err(DetectError::Backend("model crashed".into()))]),
            config: DetectorConfig::default(),
        };
        let mut p = Pipeline::new(
            Box::new(det),
            Box::new(RecordingMixer::default()),
            DistanceMap::default(),
            0,
            true,
        );
        let err = p.process_frame(&mut Frame::new(64, 64, BG)).unwrap_err();
        assert!(matches!(err, AppError::Detect(DetectError::Backend(_))));
    }

    #[test]
    fn mixer_failure_propagates() {
        let mixer = RecordingMixer { fail: true, ..RecordingMixer::default() };
        let mut p = pipeline_with(vec![tips((0, 0), (0, 100))], mixer);
        let err = p.process_frame(&mut Frame::new(64, 64, BG)).unwrap_err();
        assert!(matches!(err, AppError::Volume(_)));
    }

    #[test]
    fn second_hand_index_selects_nothing_with_single_hand_config() {
        let mut p = Pipeline::new(
            Box::new(ScriptedDetector::new(vec![tips((0, 0), (0, 100))])),
            Box::new(RecordingMixer::default()),
            DistanceMap::default(),
            1,
            true,
        );
        assert_eq!(p.process_frame(&mut Frame::new(64, 64, BG)).unwrap(), None);
    }

    // ── run_loop ──────────────────────────────────────────────────────────

    #[test]
    fn loop_ends_when_capture_fails() {
        let mixer = RecordingMixer::default();
        let hands = vec![tips((0, 0), (0, 165)), LandmarkSet::empty(), tips((0, 0), (0, 300))];
        let mut p = pipeline_with(hands, mixer.clone());
        let mut cam = FixedCamera { left: 5 };
        let mut surface = CountingSurface { shown: 0, quit_after: None, last_ink: false };

        let stats = run_loop(&mut cam, &mut p, &mut surface).unwrap();
        assert_eq!(stats, RunStats { frames: 5, hand_frames: 2, exit: ExitReason::CaptureEnded });
        assert_eq!(surface.shown, 5);
        assert_eq!(mixer.calls.borrow().len(), 2);
    }

    #[test]
    fn loop_ends_on_quit_key() {
        let mut p = pipeline_with(vec![], RecordingMixer::default());
        let mut cam = FixedCamera { left: 100 };
        let mut surface = CountingSurface { shown: 0, quit_after: Some(3), last_ink: false };

        let stats = run_loop(&mut cam, &mut p, &mut surface).unwrap();
        assert_eq!(stats.exit, ExitReason::QuitRequested);
        assert_eq!(stats.frames, 3);
        assert_eq!(cam.left, 97);
    }

    #[test]
    fn annotated_frame_is_what_gets_shown() {
        let mut p = pipeline_with(vec![tips((50, 200), (50, 300))], RecordingMixer::default());
        let mut cam = FixedCamera { left: 1 };
        let mut surface = CountingSurface { shown: 0, quit_after: None, last_ink: false };
        run_loop(&mut cam, &mut p, &mut surface).unwrap();
        assert!(surface.last_ink);
    }

    #[test]
    fn loop_stops_on_first_error() {
        let short = LandmarkSet::new(vec![Landmark::new(0, 1, 1)], 1.0);
        let mut p = pipeline_with(vec![tips((0, 0), (0, 100)), short], RecordingMixer::default());
        let mut cam = FixedCamera { left: 10 };
        let mut surface = CountingSurface { shown: 0, quit_after: None, last_ink: false };
        assert!(run_loop(&mut cam, &mut p, &mut surface).is_err());
        assert_eq!(surface.shown, 1);
        assert_eq!(cam.left, 8);
    }
}
