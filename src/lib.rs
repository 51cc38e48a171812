pub mod config;
pub mod dispatcher;
pub mod hint;
pub mod hotkey;
pub mod key;
pub mod line_ops;
pub mod linebreak;
pub mod traits;
pub mod types;

pub use crate::config::{ConfigError, Features, HotkeyConfig, Shortcut, ToolbarEntry};
pub use crate::dispatcher::{Dispatcher, DispatcherBuilder, DispatcherSnapshot, Step};
pub use crate::hint::{EnterSuppression, HintNavigator, HintState};
pub use crate::hotkey::{DescriptorError, HotkeyDescriptor};
pub use crate::key::{KeyCode, KeyEvent, Modifiers};
pub use crate::linebreak::BreakPlan;
pub use crate::traits::{Document, HintList, Host};
pub use crate::types::{Boundary, NodeId, NodeKind, Outcome, SelectionRange};
