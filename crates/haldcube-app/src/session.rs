//! Runs tasks requested by the state machine.
//!
//! The session owns the canvas (the decoded Hald image) and is the only
//! place effects are applied. Tasks run synchronously, so the canvas is
//! never touched by two operations at once.

use std::collections::{HashMap, VecDeque};

use haldcube_color::{generate_neutral, hald_to_cube};
use haldcube_core::{HaldError, HaldLevel, PixelBuffer};
use haldcube_media::{load_hald, save_cube, save_hald};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::state::{update, AppState, Control, Effect, Event, NotifyLevel, Task, TaskOutcome};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("request rejected: {0}")]
    Rejected(String),
    #[error(transparent)]
    Failed(#[from] HaldError),
}

pub struct Session {
    state: AppState,
    canvas: Option<PixelBuffer>,
    controls: HashMap<Control, bool>,
}

impl Session {
    pub fn new(level: HaldLevel) -> Self {
        let state = AppState::new(level);
        let controls = Control::ALL
            .iter()
            .map(|&c| (c, state.is_enabled(c)))
            .collect();
        Self {
            state,
            canvas: None,
            controls,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// The decoded Hald image, if one is loaded.
    pub fn canvas(&self) -> Option<&PixelBuffer> {
        self.canvas.as_ref()
    }

    /// Current enabled flag of `control` as last applied.
    pub fn is_enabled(&self, control: Control) -> bool {
        self.controls.get(&control).copied().unwrap_or(false)
    }

    /// Feed `event` through the state machine and run any resulting task
    /// to completion.
    ///
    /// Returns the outcome of the task the event started, `Ok(None)` when
    /// the event started no task.
    pub fn dispatch(&mut self, event: Event) -> Result<Option<TaskOutcome>, SessionError> {
        let mut queue = VecDeque::from([event]);
        let mut outcome = None;
        let mut failure = None;

        while let Some(event) = queue.pop_front() {
            let (next, effects) = update(self.state.clone(), event);
            self.state = next;

            for effect in effects {
                match effect {
                    Effect::SetEnabled { control, enabled } => {
                        let verb = if enabled { "enabled" } else { "disabled" };
                        debug!("{:?} control {}", control, verb);
                        self.controls.insert(control, enabled);
                    }
                    Effect::Notify { level, message } => match level {
                        NotifyLevel::Info => info!("{}", message),
                        NotifyLevel::Error => error!("{}", message),
                    },
                    Effect::Rejected { reason } => {
                        warn!("{}", reason);
                        return Err(SessionError::Rejected(reason));
                    }
                    Effect::Run(task) => match self.run(task) {
                        Ok(done) => {
                            outcome = Some(done.clone());
                            queue.push_back(Event::TaskSucceeded(done));
                        }
                        Err(e) => {
                            queue.push_back(Event::TaskFailed {
                                message: e.to_string(),
                            });
                            failure = Some(e);
                        }
                    },
                }
            }
        }

        match failure {
            Some(e) => Err(e.into()),
            None => Ok(outcome),
        }
    }

    fn run(&mut self, task: Task) -> Result<TaskOutcome, HaldError> {
        let level = self.state.level;
        match task {
            Task::Generate { path, format } => {
                let hald = generate_neutral(level);
                save_hald(&hald, &path, format)?;
                Ok(TaskOutcome::Generated { path })
            }
            Task::Open { path } => {
                self.canvas = None;
                self.canvas = Some(load_hald(&path, level)?);
                Ok(TaskOutcome::Opened { path })
            }
            Task::Convert { path, title } => {
                let hald = self.canvas.as_ref().ok_or(HaldError::NoHaldLoaded)?;
                let cube = hald_to_cube(hald, level, &title)?;
                save_cube(&cube, &path)?;
                Ok(TaskOutcome::Converted { path })
            }
        }
    }
}
