use super::{highscores_url, socket_url};
use crate::error::{WebError, WebErrorExt};
use crate::round::SocketEvent;
use powermatch::domain::game::Difficulty;
use powermatch::domain::protocol::{GameRequest, ServerMessage};
use powermatch::domain::score::Score;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{CloseEvent, Event, MessageEvent, Response, WebSocket};

/// Open game socket. Dropping it detaches the handlers and closes the socket.
pub(crate) struct RoundSocket {
    socket: WebSocket,
    _on_open: Closure<dyn FnMut(Event)>,
    _on_message: Closure<dyn FnMut(MessageEvent)>,
    _on_close: Closure<dyn FnMut(CloseEvent)>,
}

impl fmt::Debug for RoundSocket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoundSocket").field("url", &self.socket.url()).finish_non_exhaustive()
    }
}

impl Drop for RoundSocket {
    fn drop(&mut self) {
        self.socket.set_onopen(None);
        self.socket.set_onmessage(None);
        self.socket.set_onclose(None);
        if let Err(e) = self.socket.close() {
            debug!(error = ?e, "Game socket already closed");
        }
    }
}

fn browser_error(value: JsValue) -> WebError {
    WebError::Browser { message: format!("{value:?}").into(), context: None }
}

fn window() -> Result<web_sys::Window, WebError> {
    web_sys::window().ok_or_else(|| WebError::Browser {
        message: "No window object".into(),
        context: None,
    })
}

/// Opens the game socket and sends `request` once connected.
///
/// Every frame, and the final close, is handed to `on_event`.
pub(crate) fn open_round(
    request: &GameRequest,
    on_event: impl FnMut(SocketEvent) + 'static,
) -> Result<RoundSocket, WebError> {
    let location = window()?.location();
    let url = socket_url(
        &location.protocol().map_err(browser_error)?,
        &location.host().map_err(browser_error)?,
    );
    let payload = serde_json::to_string(request).context("Encoding game request")?;

    let socket = WebSocket::new(&url).map_err(browser_error).context("Opening game socket")?;
    let on_event = Rc::new(RefCell::new(on_event));

    let sender = socket.clone();
    let on_open = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
        if let Err(e) = sender.send_with_str(&payload) {
            warn!(error = ?e, "Failed to send game request");
        }
    });

    let handler = Rc::clone(&on_event);
    let on_message = Closure::<dyn FnMut(MessageEvent)>::new(move |event: MessageEvent| {
        let Some(text) = event.data().as_string() else {
            return;
        };
        let event = match serde_json::from_str::<ServerMessage>(&text) {
            Ok(message) => SocketEvent::Message(message),
            Err(e) => SocketEvent::Failed(format!("Malformed server frame: {e}")),
        };
        (handler.borrow_mut())(event);
    });

    let handler = Rc::clone(&on_event);
    let on_close = Closure::<dyn FnMut(CloseEvent)>::new(move |_: CloseEvent| {
        (handler.borrow_mut())(SocketEvent::Closed);
    });

    socket.set_onopen(Some(on_open.as_ref().unchecked_ref()));
    socket.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
    socket.set_onclose(Some(on_close.as_ref().unchecked_ref()));

    debug!(%url, "Game socket opened");
    Ok(RoundSocket { socket, _on_open: on_open, _on_message: on_message, _on_close: on_close })
}

/// Fetches the high-score table from the page origin.
pub(crate) async fn highscores(difficulty: Option<Difficulty>) -> Result<Vec<Score>, WebError> {
    let response: Response = JsFuture::from(window()?.fetch_with_str(&highscores_url(difficulty)))
        .await
        .map_err(browser_error)?
        .dyn_into()
        .map_err(browser_error)?;

    if !response.ok() {
        return Err(WebError::Browser {
            message: format!("HTTP {}", response.status()).into(),
            context: Some("Loading high scores".into()),
        });
    }

    let body = JsFuture::from(response.text().map_err(browser_error)?)
        .await
        .map_err(browser_error)?
        .as_string()
        .unwrap_or_default();

    serde_json::from_str(&body).context("Decoding high scores")
}
