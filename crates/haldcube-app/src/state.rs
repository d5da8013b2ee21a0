//! Application state and its transitions.
//!
//! `update` is pure: it takes the current state and an event and returns
//! the next state plus the effects the caller must apply. Only one task
//! runs at a time; requests that arrive while a task is in flight are
//! rejected.

use std::path::PathBuf;

use haldcube_core::HaldLevel;
use haldcube_media::HaldImageFormat;

/// User-facing controls whose availability depends on state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Generate,
    Open,
    Convert,
    Title,
}

impl Control {
    pub const ALL: [Control; 4] = [
        Control::Generate,
        Control::Open,
        Control::Convert,
        Control::Title,
    ];
}

/// A unit of work executed outside `update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// Render the neutral Hald and save it.
    Generate {
        path: PathBuf,
        format: HaldImageFormat,
    },
    /// Decode a Hald image into the canvas.
    Open { path: PathBuf },
    /// Convert the canvas to a `.cube` file.
    Convert { path: PathBuf, title: String },
}

impl Task {
    fn describe(&self) -> String {
        match self {
            Task::Generate { path, .. } => format!("generate {}", path.display()),
            Task::Open { path } => format!("open {}", path.display()),
            Task::Convert { path, .. } => format!("convert to {}", path.display()),
        }
    }
}

/// Result of a task that completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Generated { path: PathBuf },
    Opened { path: PathBuf },
    Converted { path: PathBuf },
}

/// Severity of a user notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Error,
}

/// Inputs to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    TitleChanged(String),
    GenerateRequested {
        path: PathBuf,
        format: HaldImageFormat,
    },
    OpenRequested { path: PathBuf },
    ConvertRequested { path: PathBuf },
    TaskSucceeded(TaskOutcome),
    TaskFailed { message: String },
}

/// Side effects requested by `update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SetEnabled { control: Control, enabled: bool },
    Run(Task),
    Notify { level: NotifyLevel, message: String },
    /// The event was refused and the state is unchanged.
    Rejected { reason: String },
}

/// A Hald image that decoded and validated successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedHald {
    pub path: PathBuf,
    pub level: HaldLevel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub title: String,
    pub level: HaldLevel,
    pub loaded: Option<LoadedHald>,
    pub busy: Option<Task>,
}

impl AppState {
    pub fn new(level: HaldLevel) -> Self {
        Self {
            title: String::new(),
            level,
            loaded: None,
            busy: None,
        }
    }

    /// Whether `control` may be triggered in this state.
    pub fn is_enabled(&self, control: Control) -> bool {
        if self.busy.is_some() {
            return false;
        }
        match control {
            Control::Generate | Control::Open | Control::Title => true,
            Control::Convert => self.loaded.is_some(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(HaldLevel::DEFAULT)
    }
}

/// Compute the next state and effects for `event`.
pub fn update(state: AppState, event: Event) -> (AppState, Vec<Effect>) {
    if let Some(task) = &state.busy {
        if !matches!(event, Event::TaskSucceeded(_) | Event::TaskFailed { .. }) {
            let reason = format!("busy: waiting for {} to finish", task.describe());
            return (state, vec![Effect::Rejected { reason }]);
        }
    }

    let mut next = state.clone();
    let mut effects = Vec::new();

    match event {
        Event::TitleChanged(title) => {
            next.title = title;
        }
        Event::GenerateRequested { path, format } => {
            let task = Task::Generate { path, format };
            next.busy = Some(task.clone());
            effects.push(Effect::Run(task));
        }
        Event::OpenRequested { path } => {
            next.loaded = None;
            let task = Task::Open { path };
            next.busy = Some(task.clone());
            effects.push(Effect::Run(task));
        }
        Event::ConvertRequested { path } => {
            if state.loaded.is_none() {
                let reason = "no Hald image loaded; open one before converting".to_string();
                return (state, vec![Effect::Rejected { reason }]);
            }
            let task = Task::Convert {
                path,
                title: state.title.clone(),
            };
            next.busy = Some(task.clone());
            effects.push(Effect::Run(task));
        }
        Event::TaskSucceeded(outcome) => {
            next.busy = None;
            let message = match &outcome {
                TaskOutcome::Generated { path } => {
                    format!("Hald successfully saved to {}", path.display())
                }
                TaskOutcome::Opened { path } => {
                    next.loaded = Some(LoadedHald {
                        path: path.clone(),
                        level: state.level,
                    });
                    format!("Hald loaded from {}", path.display())
                }
                TaskOutcome::Converted { path } => {
                    format!("LUT successfully saved to {}", path.display())
                }
            };
            effects.push(Effect::Notify {
                level: NotifyLevel::Info,
                message,
            });
        }
        Event::TaskFailed { message } => {
            let what = state
                .busy
                .as_ref()
                .map(Task::describe)
                .unwrap_or_else(|| "task".to_string());
            next.busy = None;
            effects.push(Effect::Notify {
                level: NotifyLevel::Error,
                message: format!("could not {}: {}", what, message),
            });
        }
    }

    // Control changes go first so triggers are disabled before work starts.
    let mut ordered: Vec<Effect> = Control::ALL
        .iter()
        .filter(|&&c| state.is_enabled(c) != next.is_enabled(c))
        .map(|&c| Effect::SetEnabled {
            control: c,
            enabled: next.is_enabled(c),
        })
        .collect();
    ordered.extend(effects);

    (next, ordered)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(p: &str) -> PathBuf {
        PathBuf::from(p)
    }

    fn loaded_state() -> AppState {
        let mut state = AppState::default();
        state.loaded = Some(LoadedHald {
            path: path("hald.png"),
            level: HaldLevel::DEFAULT,
        });
        state
    }

    fn runs(effects: &[Effect]) -> Vec<&Task> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Run(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_initial_controls() {
        let state = AppState::default();
        assert!(state.is_enabled(Control::Generate));
        assert!(state.is_enabled(Control::Open));
        assert!(state.is_enabled(Control::Title));
        assert!(!state.is_enabled(Control::Convert));
    }

    #[test]
    fn test_convert_requires_loaded_hald() {
        let state = AppState::default();
        let (next, effects) = update(
            state.clone(),
            Event::ConvertRequested {
                path: path("out.cube"),
            },
        );
        assert_eq!(next, state);
        assert!(matches!(effects.as_slice(), [Effect::Rejected { .. }]));
    }

    #[test]
    fn test_open_disables_everything_then_enables_convert() {
        let (busy, effects) = update(
            AppState::default(),
            Event::OpenRequested {
                path: path("hald.png"),
            },
        );
        assert!(busy.busy.is_some());
        assert!(effects.contains(&Effect::SetEnabled {
            control: Control::Generate,
            enabled: false
        }));
        assert_eq!(
            runs(&effects),
            vec![&Task::Open {
                path: path("hald.png")
            }]
        );
        // Controls are switched off before the task is started.
        assert!(matches!(effects.last(), Some(Effect::Run(_))));

        let (done, effects) = update(
            busy,
            Event::TaskSucceeded(TaskOutcome::Opened {
                path: path("hald.png"),
            }),
        );
        assert_eq!(
            done.loaded,
            Some(LoadedHald {
                path: path("hald.png"),
                level: HaldLevel::DEFAULT,
            })
        );
        assert!(done.is_enabled(Control::Convert));
        assert!(effects.contains(&Effect::SetEnabled {
            control: Control::Convert,
            enabled: true
        }));
    }

    #[test]
    fn test_requests_rejected_while_busy() {
        let (busy, _) = update(
            AppState::default(),
            Event::GenerateRequested {
                path: path("n.png"),
                format: HaldImageFormat::Png,
            },
        );
        for event in [
            Event::OpenRequested { path: path("x.png") },
            Event::GenerateRequested {
                path: path("y.png"),
                format: HaldImageFormat::Png,
            },
            Event::TitleChanged("late".into()),
        ] {
            let (next, effects) = update(busy.clone(), event);
            assert_eq!(next, busy);
            assert!(matches!(effects.as_slice(), [Effect::Rejected { .. }]));
        }
    }

    #[test]
    fn test_convert_uses_current_title() {
        let (state, _) = update(loaded_state(), Event::TitleChanged("My Look".into()));
        let (_, effects) = update(
            state,
            Event::ConvertRequested {
                path: path("look.cube"),
            },
        );
        assert_eq!(
            runs(&effects),
            vec![&Task::Convert {
                path: path("look.cube"),
                title: "My Look".into()
            }]
        );
    }

    #[test]
    fn test_failed_convert_restores_controls() {
        let before = loaded_state();
        let (busy, _) = update(
            before.clone(),
            Event::ConvertRequested {
                path: path("/ro/look.cube"),
            },
        );
        let (after, effects) = update(
            busy,
            Event::TaskFailed {
                message: "permission denied".into(),
            },
        );
        assert_eq!(after, before);
        for control in Control::ALL {
            assert_eq!(after.is_enabled(control), before.is_enabled(control));
        }
        assert!(effects.iter().any(|e| matches!(
            e,
            Effect::Notify { level: NotifyLevel::Error, message }
                if message.contains("permission denied")
        )));
    }

    #[test]
    fn test_failed_open_leaves_nothing_loaded() {
        let (busy, _) = update(
            loaded_state(),
            Event::OpenRequested {
                path: path("broken.png"),
            },
        );
        let (after, _) = update(
            busy,
            Event::TaskFailed {
                message: "corrupt".into(),
            },
        );
        assert_eq!(after.loaded, None);
        assert!(!after.is_enabled(Control::Convert));
        assert!(after.is_enabled(Control::Open));
    }

    #[test]
    fn test_generate_keeps_loaded_hald() {
        let (busy, _) = update(
            loaded_state(),
            Event::GenerateRequested {
                path: path("n.png"),
                format: HaldImageFormat::Png,
            },
        );
        let (after, _) = update(
            busy,
            Event::TaskSucceeded(TaskOutcome::Generated {
                path: path("n.png"),
            }),
        );
        assert_eq!(after, loaded_state());
    }
}
