//! Catching panics raised by update handlers.

use std::any::Any;
use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

/// A panic caught while running an update handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerPanic {
    pub message: String,
    pub file: String,
    pub line: u32,
}

thread_local! {
    // Location of the latest panic on this thread, recorded by the hook
    static LAST_LOCATION: RefCell<Option<(String, u32)>> = const { RefCell::new(None) };
}

static HOOK: Once = Once::new();

/// Chains a hook recording panic locations in front of the current one.
fn install_hook() {
    HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if let Some(location) = info.location() {
                let recorded = (location.file().to_string(), location.line());
                LAST_LOCATION.with(|slot| *slot.borrow_mut() = Some(recorded));
            }
            previous(info);
        }));
    });
}

/// Runs `f`, turning a panic into a [`HandlerPanic`].
pub fn catch_panic<T>(f: impl FnOnce() -> T) -> Result<T, HandlerPanic> {
    install_hook();
    LAST_LOCATION.with(|slot| slot.borrow_mut().take());

    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        let (file, line) = LAST_LOCATION
            .with(|slot| slot.borrow_mut().take())
            .unwrap_or_else(|| ("<unknown>".to_string(), 0));
        HandlerPanic {
            message: payload_message(payload.as_ref()),
            file,
            line,
        }
    })
}

fn payload_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic with a non-string payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_passes_through() {
        assert_eq!(catch_panic(|| 7), Ok(7));
    }

    #[test]
    fn test_panic_caught_with_location() {
        let line = line!() + 1;
        let caught = catch_panic::<()>(|| panic!("boom {}", 7)).unwrap_err();

        assert_eq!(caught.message, "boom 7");
        assert_eq!(caught.file, file!());
        assert_eq!(caught.line, line);
    }

    #[test]
    fn test_static_message() {
        let caught = catch_panic::<()>(|| panic!("static")).unwrap_err();
        assert_eq!(caught.message, "static");
    }
}
