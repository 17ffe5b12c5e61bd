//! # Context Defaults
//!
//! Lets an ancestor render call inject attribute defaults into components
//! built anywhere below it, without intermediate components forwarding them.
//!
//! ```rust,ignore
//! // Every `Button` constructed while the closure runs starts from
//! // `{"size": "sm"}`, however deep in the tree it is built.
//! let html = Button::with_attributes(attrs!({"size": "sm"}), || {
//!     Toolbar::new(attrs!({}))?.render(Markup::new())
//! })?;
//! ```
//!
//! ## Model
//!
//! Defaults live on an explicit stack of frames, one stack per thread. Each
//! frame targets a single component type. Entering [`with_attributes`]
//! pushes a frame and leaving it pops the frame again, whether the closure
//! returns normally, returns an `Err`, or panics.
//!
//! Nested blocks for the same component type stack: the effective defaults
//! are the merge of every active frame for that type, outermost first, so
//! inner blocks override outer scalars and extend outer classes.
//!
//! A render tree runs on a single thread and its frames never leave it;
//! renders on other threads see their own, independent stack.

use crate::attributes::AttributeMap;
use crate::component::Component;
use std::any::{type_name, TypeId};
use std::cell::RefCell;
use std::marker::PhantomData;

struct Frame {
    owner: TypeId,
    defaults: AttributeMap,
}

thread_local! {
    static FRAMES: RefCell<Vec<Frame>> = const { RefCell::new(Vec::new()) };
}

/// Pops its frame when dropped.
///
/// Dropping a guard removes its frame and every frame pushed after it. Guards
/// are neither `Send` nor `Sync` so a frame cannot be released from another
/// thread.
#[must_use = "the frame is popped as soon as the guard is dropped"]
pub struct ContextGuard {
    depth: usize,
    owner: &'static str,
    _thread_bound: PhantomData<*const ()>,
}

impl ContextGuard {
    /// Push `defaults` for component type `C`.
    pub(crate) fn push<C: Component>(defaults: AttributeMap) -> Self {
        let owner = type_name::<C>();
        let depth = FRAMES.with(|frames| {
            let mut frames = frames.borrow_mut();
            frames.push(Frame {
                owner: TypeId::of::<C>(),
                defaults,
            });
            frames.len() - 1
        });
        tracing::debug!(component = owner, depth, "pushed context defaults");
        Self {
            depth,
            owner,
            _thread_bound: PhantomData,
        }
    }
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        let released = FRAMES.try_with(|frames| {
            let mut frames = frames.borrow_mut();
            let found = frames.len();
            frames.truncate(self.depth);
            found
        });
        match released {
            Ok(found) if found != self.depth + 1 => tracing::warn!(
                component = self.owner,
                depth = self.depth,
                found,
                "context frames released out of order"
            ),
            Ok(_) => {
                tracing::debug!(component = self.owner, depth = self.depth, "popped context defaults")
            }
            Err(_) => tracing::trace!(
                component = self.owner,
                depth = self.depth,
                "context stack already torn down"
            ),
        }
    }
}

/// Run `block` with `defaults` active for component type `C`.
///
/// Returns whatever `block` returns. The frame is removed before this
/// function returns or unwinds.
pub fn with_attributes<C, R, F>(defaults: AttributeMap, block: F) -> R
where
    C: Component,
    F: FnOnce() -> R,
{
    let _guard = ContextGuard::push::<C>(defaults);
    block()
}

/// Effective defaults for component type `C`, or `None` outside any block.
pub fn active_defaults<C: Component>() -> Option<AttributeMap> {
    let owner = TypeId::of::<C>();
    let frames: Vec<AttributeMap> = FRAMES.with(|frames| {
        frames
            .borrow()
            .iter()
            .filter(|frame| frame.owner == owner)
            .map(|frame| frame.defaults.clone())
            .collect()
    });

    match frames.len() {
        0 => None,
        1 => frames.into_iter().next(),
        _ => Some(C::config().merge_engine().merge(frames.iter().map(Some))),
    }
}

/// Number of frames currently on this thread's stack.
pub fn depth() -> usize {
    FRAMES.with(|frames| frames.borrow().len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs;
    use crate::component::{ComponentConfig, ComponentState};
    use once_cell::sync::Lazy;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    struct Card {
        state: ComponentState,
    }

    impl Component for Card {
        fn config() -> &'static ComponentConfig<Self> {
            static CONFIG: Lazy<ComponentConfig<Card>> =
                Lazy::new(|| ComponentConfig::builder().build());
            &CONFIG
        }

        fn from_state(state: ComponentState) -> Self {
            Self { state }
        }

        fn state(&self) -> &ComponentState {
            &self.state
        }
    }

    struct Badge {
        state: ComponentState,
    }

    impl Component for Badge {
        fn config() -> &'static ComponentConfig<Self> {
            static CONFIG: Lazy<ComponentConfig<Badge>> =
                Lazy::new(|| ComponentConfig::builder().build());
            &CONFIG
        }

        fn from_state(state: ComponentState) -> Self {
            Self { state }
        }

        fn state(&self) -> &ComponentState {
            &self.state
        }
    }

    #[test]
    fn defaults_are_visible_only_inside_the_block() {
        assert!(active_defaults::<Card>().is_none());
        let seen = with_attributes::<Card, _, _>(attrs!({"id": "d"}), active_defaults::<Card>);
        assert_eq!(seen, Some(attrs!({"id": "d"})));
        assert!(active_defaults::<Card>().is_none());
        assert_eq!(depth(), 0);
    }

    #[test]
    fn block_result_is_returned() {
        let value = with_attributes::<Card, _, _>(attrs!({}), || 42);
        assert_eq!(value, 42);
    }

    #[test]
    fn frames_target_a_single_component_type() {
        with_attributes::<Card, _, _>(attrs!({"id": "card"}), || {
            assert!(active_defaults::<Badge>().is_none());
            assert!(active_defaults::<Card>().is_some());
        });
    }

    #[test]
    fn nested_blocks_merge_outermost_first() {
        let seen = with_attributes::<Card, _, _>(attrs!({"id": "outer", "class": "a"}), || {
            with_attributes::<Badge, _, _>(attrs!({"id": "badge"}), || {
                with_attributes::<Card, _, _>(
                    attrs!({"id": "inner", "class": "b"}),
                    active_defaults::<Card>,
                )
            })
        });
        assert_eq!(seen, Some(attrs!({"id": "inner", "class": "a b"})));
    }

    #[test]
    fn inner_block_exit_restores_outer_defaults() {
        with_attributes::<Card, _, _>(attrs!({"id": "outer"}), || {
            with_attributes::<Card, _, _>(attrs!({"id": "inner"}), || {});
            assert_eq!(active_defaults::<Card>(), Some(attrs!({"id": "outer"})));
        });
    }

    #[test]
    fn error_results_still_pop_the_frame() {
        let result: Result<(), &str> =
            with_attributes::<Card, _, _>(attrs!({"id": "d"}), || Err("boom"));
        assert!(result.is_err());
        assert!(active_defaults::<Card>().is_none());
        assert_eq!(depth(), 0);
    }

    #[test]
    fn panics_still_pop_the_frame() {
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            with_attributes::<Card, _, _>(attrs!({"id": "d"}), || panic!("render failed"))
        }));
        assert!(outcome.is_err());
        assert!(active_defaults::<Card>().is_none());
        assert_eq!(depth(), 0);
    }

    #[test]
    fn other_threads_do_not_see_frames() {
        with_attributes::<Card, _, _>(attrs!({"id": "here"}), || {
            let elsewhere = std::thread::spawn(|| active_defaults::<Card>().is_none())
                .join()
                .unwrap();
            assert!(elsewhere);
        });
    }

    #[test]
    fn releasing_an_outer_guard_first_clears_the_whole_stack() {
        let outer = ContextGuard::push::<Card>(attrs!({"id": "outer"}));
        let inner = ContextGuard::push::<Card>(attrs!({"id": "inner"}));
        assert_eq!(depth(), 2);

        drop(outer);
        assert_eq!(depth(), 0);
        assert!(active_defaults::<Card>().is_none());

        drop(inner);
        assert_eq!(depth(), 0);
    }
}
