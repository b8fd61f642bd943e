//! Yew context provider for the session

use super::context::SessionContext;
use crate::auth::error_handler::{clear_auth_error_callback, set_auth_error_callback};
use std::rc::Rc;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    pub session: SessionContext,
    /// Called after a rejected session has been cleared, e.g. to go to login
    #[prop_or_default]
    pub on_auth_error: Option<Callback<()>>,
    pub children: Children,
}

/// Shares the session with descendants and clears it when the backend
/// rejects the token
#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    {
        let session = props.session.clone();
        let on_auth_error = props.on_auth_error.clone();
        use_effect_with((), move |_| {
            set_auth_error_callback(Rc::new(move || {
                tracing::info!("Session rejected by the backend, signing out");
                if let Err(err) = session.clear_token() {
                    tracing::warn!(error = %err, "Failed to clear rejected session");
                }
                if let Some(callback) = &on_auth_error {
                    callback.emit(());
                }
            }));

            clear_auth_error_callback
        });
    }

    html! {
        <ContextProvider<SessionContext> context={props.session.clone()}>
            {props.children.clone()}
        </ContextProvider<SessionContext>>
    }
}

/// Session from the nearest [`SessionProvider`]
#[hook]
pub fn use_session() -> Option<SessionContext> {
    use_context::<SessionContext>()
}
