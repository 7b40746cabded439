//! helpkit - small value utilities
//!
//! URL checks, deep merge, async-callback classification, debounce,
//! pre-order tree walks and cycle-safe deep copy. Each helper stands alone.

pub mod callback;
pub mod config;
pub mod debounce;
pub mod deep_copy;
pub mod error;
pub mod graph;
pub mod merge;
pub mod tree;
pub mod urls;

pub use callback::{is_async_fn, Callback, ExecutionKind};
pub use config::HelpersConfig;
pub use debounce::{debounce_run, TimerSlot, DEFAULT_WAIT};
pub use deep_copy::deep_copy;
pub use error::{FixSuggestion, HelperError, Result};
pub use graph::GraphValue;
pub use merge::{deep_merge, deep_merge_all, try_deep_merge, ArrayMode};
pub use tree::{pre_order_ids, traverse_tree, walk_pre_order, TreeNode};
pub use urls::is_url;
