use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::config::{Features, HotkeyConfig, Shortcut};
use crate::hint::HintNavigator;
use crate::hotkey::HotkeyDescriptor;
use crate::key::{KeyCode, KeyEvent};
use crate::linebreak::insert_line_break;
use crate::line_ops::{delete_line, duplicate_line, indent_selection};
use crate::traits::{Document, HintList, Host};
use crate::types::Outcome;

/// Pipeline steps, in the order every key event visits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Escape,
    Hint,
    Enter,
    DeleteLine,
    DuplicateLine,
    Shortcuts,
    Indent,
}

impl Step {
    pub const ORDER: [Step; 7] = [
        Step::Escape,
        Step::Hint,
        Step::Enter,
        Step::DeleteLine,
        Step::DuplicateLine,
        Step::Shortcuts,
        Step::Indent,
    ];
}

#[derive(Debug, Clone)]
pub struct Dispatcher {
    features: Features,
    navigator: HintNavigator,
}

#[derive(Debug, Clone)]
pub struct DispatcherSnapshot {
    pub hints_enabled: bool,
    pub enter_suppressed: bool,
    pub shortcut_count: usize,
}

#[derive(Default)]
pub struct DispatcherBuilder {
    features: Features,
}

impl DispatcherBuilder {
    pub fn features(mut self, features: Features) -> Self {
        self.features = features;
        self
    }

    /// Replaces all features with those built from `config`, dropping
    /// invalid hotkeys.
    pub fn config(self, config: &HotkeyConfig) -> Self {
        self.features(Features::from_config(config))
    }

    pub fn escape(mut self, enabled: bool) -> Self {
        self.features.escape = enabled;
        self
    }

    pub fn ctrl_enter(mut self, enabled: bool) -> Self {
        self.features.ctrl_enter = enabled;
        self
    }

    pub fn delete_line(mut self, hotkey: HotkeyDescriptor) -> Self {
        self.features.delete_line = Some(hotkey);
        self
    }

    pub fn duplicate_line(mut self, hotkey: HotkeyDescriptor) -> Self {
        self.features.duplicate_line = Some(hotkey);
        self
    }

    pub fn shortcut(mut self, name: impl Into<String>, hotkey: HotkeyDescriptor) -> Self {
        self.features.shortcuts.push(Shortcut {
            name: name.into(),
            hotkey,
        });
        self
    }

    pub fn indent(mut self, indent: impl Into<String>) -> Self {
        let indent = indent.into();
        self.features.indent = (!indent.is_empty()).then_some(indent);
        self
    }

    pub fn hints(mut self, enabled: bool) -> Self {
        self.features.hints = enabled;
        self
    }

    pub fn enter_suppression(mut self, window: Duration) -> Self {
        self.features.enter_suppression = window;
        self
    }

    pub fn build(self) -> Dispatcher {
        Dispatcher {
            navigator: HintNavigator::new(self.features.enter_suppression),
            features: self.features,
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        DispatcherBuilder::default().build()
    }
}

impl Dispatcher {
    pub fn new(features: Features) -> Self {
        DispatcherBuilder::default().features(features).build()
    }

    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::default()
    }

    pub fn features(&self) -> &Features {
        &self.features
    }

    pub fn is_enter_suppressed(&self, now: Instant) -> bool {
        self.navigator.suppresses_enter(now)
    }

    pub fn snapshot(&self) -> DispatcherSnapshot {
        DispatcherSnapshot {
            hints_enabled: self.features.hints,
            enter_suppressed: self.is_enter_suppressed(Instant::now()),
            shortcut_count: self.features.shortcuts.len(),
        }
    }

    /// Handles one key press. The host should prevent the event's default
    /// behaviour when the result [claims](Outcome::claims_event) it.
    pub fn handle_event<D, L, H>(
        &mut self,
        doc: &mut D,
        hints: &mut L,
        host: &mut H,
        event: &KeyEvent,
    ) -> Outcome
    where
        D: Document + ?Sized,
        L: HintList + ?Sized,
        H: Host + ?Sized,
    {
        self.handle_event_at(doc, hints, host, event, Instant::now())
    }

    /// [`handle_event`](Self::handle_event) with an explicit clock reading.
    pub fn handle_event_at<D, L, H>(
        &mut self,
        doc: &mut D,
        hints: &mut L,
        host: &mut H,
        event: &KeyEvent,
        now: Instant,
    ) -> Outcome
    where
        D: Document + ?Sized,
        L: HintList + ?Sized,
        H: Host + ?Sized,
    {
        let mut outcome = Outcome::Declined;
        for step in Step::ORDER {
            let result = self.run_step(step, doc, hints, host, event, now);
            if result == Outcome::Declined {
                continue;
            }
            debug!(?step, ?result, key = ?event.code, "key handled");
            outcome = outcome.max(result);
            if result == Outcome::Stop {
                break;
            }
        }
        if outcome == Outcome::Declined {
            trace!(key = ?event.code, mods = ?event.mods, "key declined");
        }
        outcome
    }

    fn run_step<D, L, H>(
        &mut self,
        step: Step,
        doc: &mut D,
        hints: &mut L,
        host: &mut H,
        event: &KeyEvent,
        now: Instant,
    ) -> Outcome
    where
        D: Document + ?Sized,
        L: HintList + ?Sized,
        H: Host + ?Sized,
    {
        match step {
            Step::Escape => {
                if !self.features.escape || event.code != KeyCode::Esc {
                    return Outcome::Declined;
                }
                host.on_escape(&doc.plain_text());
                Outcome::Continue
            }
            Step::Hint => {
                if !self.features.hints {
                    return Outcome::Declined;
                }
                self.navigator.handle(hints, host, event, now)
            }
            Step::Enter => {
                if event.code != KeyCode::Enter {
                    return Outcome::Declined;
                }
                if event.mods.has_command() {
                    if !self.features.ctrl_enter {
                        return Outcome::Declined;
                    }
                    host.on_ctrl_enter(&doc.plain_text());
                    Outcome::Continue
                } else if self.navigator.suppresses_enter(now) {
                    debug!("enter suppressed after hint commit");
                    Outcome::Declined
                } else {
                    insert_line_break(doc)
                }
            }
            Step::DeleteLine => match self.features.delete_line {
                Some(hotkey) if hotkey.matches(event) => delete_line(doc),
                _ => Outcome::Declined,
            },
            Step::DuplicateLine => match self.features.duplicate_line {
                Some(hotkey) if hotkey.matches(event) => duplicate_line(doc),
                _ => Outcome::Declined,
            },
            Step::Shortcuts => {
                let Some(shortcut) = self
                    .features
                    .shortcuts
                    .iter()
                    .find(|s| s.hotkey.matches(event))
                else {
                    return Outcome::Declined;
                };
                host.trigger_action(&shortcut.name);
                Outcome::Stop
            }
            Step::Indent => match self.features.indent.as_deref() {
                Some(indent) if event.code == KeyCode::Tab => indent_selection(doc, indent),
                _ => Outcome::Declined,
            },
        }
    }
}
