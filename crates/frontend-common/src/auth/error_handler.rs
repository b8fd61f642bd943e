//! Global auth error handler
//!
//! The console client reports a rejected session here instead of returning
//! a special value every caller has to check for.

use std::cell::RefCell;
use std::rc::Rc;

thread_local! {
    static AUTH_ERROR_CALLBACK: RefCell<Option<Rc<dyn Fn()>>> = RefCell::new(None);
}

/// Set the callback fired when the backend rejects the session
pub fn set_auth_error_callback(callback: Rc<dyn Fn()>) {
    AUTH_ERROR_CALLBACK.with(|cb| {
        *cb.borrow_mut() = Some(callback);
    });
}

pub fn clear_auth_error_callback() {
    AUTH_ERROR_CALLBACK.with(|cb| {
        *cb.borrow_mut() = None;
    });
}

/// Fire the callback, if one is set
pub fn trigger_auth_error() {
    // Clone out first so the callback may replace itself
    let callback = AUTH_ERROR_CALLBACK.with(|cb| cb.borrow().clone());
    if let Some(callback) = callback {
        callback();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_trigger_calls_registered_callback() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        set_auth_error_callback(Rc::new(move || counter.set(counter.get() + 1)));

        trigger_auth_error();
        trigger_auth_error();
        assert_eq!(calls.get(), 2);

        clear_auth_error_callback();
        trigger_auth_error();
        assert_eq!(calls.get(), 2);
    }
}
