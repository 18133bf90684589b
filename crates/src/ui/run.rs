use crate::error::{Error, Result};
use crate::ui::model::{Group, Item, Session};
use crate::ui::Msg;
use bubbletea_rs::{
    command::Cmd, event::KeyMsg, event::WindowSizeMsg, model::Model as TeaModel, window_size,
    Program,
};
use crossterm::event::{KeyCode, KeyModifiers};
use once_cell::sync::Lazy;
use std::sync::Mutex;

// `TeaModel::init` takes no arguments, so the session is parked here right
// before the program starts and taken out (leaving `None`) by `init`.
static PENDING: Lazy<Mutex<Option<Session>>> = Lazy::new(|| Mutex::new(None));

// Translate a terminal key into a checklist message. `None` means "not ours".
pub fn map_key(key: &KeyCode, modifiers: KeyModifiers) -> Option<Msg> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match key {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(Msg::Interrupt),
            KeyCode::Char('n') | KeyCode::Char('N') => Some(Msg::KeyDown),
            KeyCode::Char('p') | KeyCode::Char('P') => Some(Msg::KeyUp),
            _ => None,
        };
    }
    match key {
        KeyCode::Up => Some(Msg::KeyUp),
        KeyCode::Down => Some(Msg::KeyDown),
        KeyCode::PageUp => Some(Msg::KeyPageUp),
        KeyCode::PageDown => Some(Msg::KeyPageDown),
        KeyCode::Home => Some(Msg::KeyHome),
        KeyCode::End => Some(Msg::KeyEnd),
        KeyCode::Enter => Some(Msg::KeyEnter),
        // Ctrl-C delivered as ETX
        KeyCode::Char('\u{03}') => Some(Msg::Interrupt),
        KeyCode::Char(' ') => Some(Msg::KeySpace),
        KeyCode::Char(ch) => Some(Msg::Rune(*ch)),
        _ => None,
    }
}

// Adapter type implementing bubbletea-rs Model trait by delegating to the Session.
// `missing_session` records an init that found no parked session.
struct TeaAdapter {
    inner: Session,
    missing_session: bool,
}

impl TeaModel for TeaAdapter {
    fn init() -> (Self, Option<Cmd>) {
        let Some(session) = PENDING.lock().ok().and_then(|mut slot| slot.take()) else {
            tracing::warn!("checklist started without a session");
            let adapter = TeaAdapter {
                inner: Session::new(Vec::new(), Vec::new()),
                missing_session: true,
            };
            return (adapter, Some(bubbletea_rs::quit()));
        };
        let mut adapter = TeaAdapter {
            inner: session,
            missing_session: false,
        };
        if let Ok((width, height)) = crossterm::terminal::size() {
            adapter.inner.update(Msg::WindowSize {
                width: width as usize,
                height: height as usize,
            });
        }
        (adapter, Some(window_size()))
    }

    fn update(&mut self, msg: bubbletea_rs::event::Msg) -> Option<Cmd> {
        if let Some(km) = msg.downcast_ref::<KeyMsg>() {
            if let Some(m) = map_key(&km.key, km.modifiers) {
                self.inner.update(m);
            }
        } else if let Some(ws) = msg.downcast_ref::<WindowSizeMsg>() {
            self.inner.update(Msg::WindowSize {
                width: ws.width as usize,
                height: ws.height as usize,
            });
        }
        if self.inner.is_done() {
            return Some(bubbletea_rs::quit());
        }
        None
    }

    fn view(&self) -> String {
        self.inner.render_full()
    }
}

/// Drive `session` on the terminal until the user confirms or aborts, then
/// hand the final session back.
pub async fn run_session(session: Session) -> Result<Session> {
    tracing::info!(
        items = session.items.len(),
        groups = session.groups.len(),
        "starting checklist"
    );
    *PENDING
        .lock()
        .map_err(|_| Error::Terminal("session handoff lock poisoned".to_string()))? = Some(session);

    let program = Program::<TeaAdapter>::builder()
        .alt_screen(true)
        .build()
        .map_err(|e| Error::Terminal(format!("failed to build program: {e:?}")))?;
    let final_adapter = program
        .run()
        .await
        .map_err(|e| Error::Terminal(format!("program error: {e:?}")))?;

    if final_adapter.missing_session {
        return Err(Error::Terminal("session handoff failed".to_string()));
    }
    Ok(final_adapter.inner)
}

/// Run the checklist and return the confirmed selection in canonical order,
/// or [`Error::Aborted`] when the user quits.
pub async fn run(items: Vec<Item>, groups: Vec<Group>) -> Result<Vec<Item>> {
    run_session(Session::new(items, groups)).await?.into_selection()
}
