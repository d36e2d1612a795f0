//! Hidden Hunt entry point
//!
//! Headless autoplay: drives a scripted player through one full run so the
//! whole pipeline (run generation, aim-and-hold confirmation, chest tools,
//! scoring, telemetry) can be exercised without a renderer attached.

use glam::Vec3;

use hidden_hunt::audio::{self, AudioSink, NullAudio};
use hidden_hunt::levels::Difficulty;
use hidden_hunt::net::{LocalLoopback, Transport, WireMessage};
use hidden_hunt::session::{FrameInput, GamePhase, Session, SessionEvent, tick};
use hidden_hunt::share::{self, ShareData};
use hidden_hunt::telemetry::{DebugLogger, LogPayload, RunLogger};

/// Frame cadence of the scripted player
const STEP: f64 = 1.0 / 60.0;

/// Session plus its fire-and-forget collaborators
struct Shell {
    session: Session,
    audio: NullAudio,
    logger: DebugLogger,
    net: LocalLoopback,
}

impl Shell {
    fn new() -> Self {
        Self {
            session: Session::default(),
            audio: NullAudio,
            logger: DebugLogger,
            net: LocalLoopback::new(),
        }
    }

    /// Advance one frame, then forward its events to the collaborators
    fn frame(&mut self, input: &FrameInput, now: f64) {
        tick(&mut self.session, input, now);
        self.dispatch();
    }

    fn dispatch(&mut self) {
        for event in self.session.drain_events() {
            if let Some(cue) = audio::cue_for(&event) {
                self.audio.play(cue);
            }
            match &event {
                SessionEvent::RunStarted => {
                    self.logger.submit(&LogPayload::game_start(&self.session));
                    self.net.send(&WireMessage::RunKey {
                        level_id: self.session.level().id.clone(),
                        run_id: self.session.run_id.clone(),
                        difficulty: self.session.difficulty.as_str().to_string(),
                    });
                }
                SessionEvent::TargetFound { id } => {
                    self.net.send(&WireMessage::TargetFound { id: id.clone() });
                }
                SessionEvent::DecoyRevealed { id } => {
                    self.net.send(&WireMessage::WrongSelection { id: id.clone() });
                }
                SessionEvent::Victory => {
                    self.logger.submit(&LogPayload::game_end(&self.session));
                    self.net.send(&WireMessage::RunWon {
                        final_score: self.session.final_score(),
                    });
                }
                _ => {}
            }
        }
    }
}

/// Pick a spot the protocol accepts: the vantage zone if one is declared,
/// otherwise just in front of the prop
fn stand_near(pos: Vec3, vantage: Option<Vec3>) -> Vec3 {
    vantage.unwrap_or(Vec3::new(pos.x, 1.6, pos.z + 1.2))
}

fn main() {
    env_logger::init();
    log::info!("Hidden Hunt (headless autoplay) starting...");

    let mut shell = Shell::new();
    shell.session.confirm_name_entry("drifter");
    shell.session.set_difficulty(Difficulty::Normal);
    shell.session.start_game(0.0);
    shell.dispatch();

    let mut now = 0.0;

    // Swing by the chest first and pocket whatever spawned
    if !shell.session.chest_tools.is_empty() {
        let chest = shell.session.level().chest_pos;
        let input = FrameInput {
            eye: chest + Vec3::new(0.0, 1.2, 1.0),
            look: Vec3::NEG_Z,
            hold: false,
            engaged: true,
        };
        now += STEP;
        shell.frame(&input, now);
        shell.session.open_chest();
        let spawned = shell.session.chest_tools.len();
        for _ in 0..spawned {
            shell.session.take_tool(0, now);
        }
        shell.session.close_chest();
        shell.dispatch();
        log::info!("pocketed {spawned} chest tools");
    }

    // Burn the tools up front; the beacons don't help a scripted player
    while !shell.session.inventory.is_empty() {
        shell.session.use_tool(0, now);
        shell.dispatch();
    }

    // Walk to every target and hold until it confirms
    for index in 0..shell.session.targets.len() {
        let (pos, vantage) = {
            let target = &shell.session.targets[index];
            (target.pos, target.vantage.map(|v| v.pos))
        };
        let eye = stand_near(pos, vantage);
        let input = FrameInput {
            eye,
            look: (pos - eye).normalize(),
            hold: true,
            engaged: true,
        };
        let goal = index as u32 + 1;
        let deadline = now + 30.0;
        while shell.session.found_count < goal && now < deadline {
            now += STEP;
            shell.frame(&input, now);
        }
        if shell.session.found_count < goal {
            log::error!("autoplay never confirmed target {index}; giving up");
            return;
        }
    }

    // Let the victory delay run out
    let idle = FrameInput::idle();
    let deadline = now + 5.0;
    while shell.session.phase != GamePhase::Won && now < deadline {
        now += STEP;
        shell.frame(&idle, now);
    }

    let score = shell.session.final_score();
    println!(
        "cleared {} in {:.1}s with {} wrong selections -> score {:.1}",
        shell.session.level().name,
        shell.session.elapsed,
        shell.session.wrong_selections,
        score
    );
    println!(
        "share code: {}",
        share::encode(&ShareData {
            player_name: shell.session.player_name.clone(),
            score,
            level: shell.session.level().name.clone(),
            difficulty: shell.session.difficulty.as_str().to_string(),
        })
    );
    log::info!("loopback swallowed {} messages", shell.net.sent_count());
}
