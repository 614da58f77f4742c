//! Zellij plugin wrapper and entry point.
//!
//! This module provides the thin integration layer between the zlookup
//! library and the Zellij plugin system. It implements the `ZellijPlugin`
//! trait to handle Zellij events, pipes, and lifecycle.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │   Zellij Event Loop (single thread)      │
//! │  ┌──────────────────┐                    │
//! │  │  State (plugin)  │  ← event mapping   │
//! │  └──────────────────┘                    │
//! │          │ Events                        │
//! │          ▼                               │
//! │  ┌──────────────────┐                    │
//! │  │  handle_event()  │  ← library layer   │
//! │  └──────────────────┘                    │
//! │          │ Actions                       │
//! │          ▼                               │
//! │  web_request / set_timeout / show_self   │
//! └──────────────────────────────────────────┘
//! ```
//!
//! Fetches are issued with `web_request`; their results arrive back as
//! `WebRequestResult` events on the same thread, carrying the context map
//! the library attached (generation + trace identity). Debounce timers are
//! `set_timeout` calls whose expiries arrive as `Timer` events.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Register for `Key`, `Timer`, `WebRequestResult` events
//! 3. **Pipes**: `zlookup:open` and `zlookup:smart-values` open the overlays
//! 4. **Update**: Handle events, delegate to library layer
//! 5. **Render**: Call library render function
//!
//! # Pipes
//!
//! Open a table browser:
//!
//! ```sh
//! zellij pipe --name zlookup:open --args table=countries
//! zellij pipe --name zlookup:open --args table=countries,query=ger,pick=true
//! ```
//!
//! With `pick=true` on a CLI pipe, the selected row's `{"code", "label"}`
//! JSON is written back to the pipe and the pipe unblocked; dismissing the
//! browser unblocks it without output. `reply_to=<name>` instead broadcasts
//! the selection as a plugin message of that name.
//!
//! Open the smart-values tooltip:
//!
//! ```sh
//! zellij pipe --name zlookup:smart-values --args type=order,payload=id%3D42,signature=...
//! ```
//!
//! # Keybindings
//!
//! While typing (default):
//! - printable keys / `Backspace`: edit the query (debounced reload)
//! - `Ctrl+n`/`Ctrl+p`: move the row selection
//! - `Down`: focus the result list
//! - `Enter`: select the highlighted row
//! - `Tab`: toggle the row's source panel
//! - `PgUp`/`PgDn`: page
//! - `Esc`: dismiss
//!
//! While navigating:
//! - `j`/`k`: move, `h`/`l`: page, `/`: back to the query field
//! - `Enter`/`Tab`/`Esc` as above, `q`: quit the pane
//!
//! Any key dismisses the smart-values tooltip while it is shown.

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;
use zellij_tile::shim::web_request;

use zlookup::api::FetchContext;
use zlookup::{handle_event, Action, Config, Event, InputMode, SelectionTarget};

// Register plugin with Zellij
register_plugin!(State);

/// Pipe name that opens the lookup table browser.
const OPEN_PIPE: &str = "zlookup:open";

/// Pipe name that opens the smart-values tooltip.
const SMART_VALUES_PIPE: &str = "zlookup:smart-values";

/// Plugin state wrapper.
///
/// Wraps the library's `AppState` with the Zellij-specific event and action
/// mapping.
struct State {
    /// Core application state from library layer.
    app: zlookup::app::AppState,
}

impl Default for State {
    fn default() -> Self {
        let default_config = Config::default();
        Self {
            app: zlookup::initialize(&default_config),
        }
    }
}

impl ZellijPlugin for State {
    /// Initializes the plugin on load.
    ///
    /// Called once during plugin startup. Parses configuration, initializes
    /// tracing and application state, requests permissions, and subscribes
    /// to events.
    ///
    /// # Permissions
    ///
    /// - `WebAccess`: fetch lookup table pages and smart values
    ///
    /// # Subscriptions
    ///
    /// - `Key`: keyboard input
    /// - `Timer`: debounce expiries
    /// - `WebRequestResult`: fetch completions
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        zlookup::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!("plugin loading started");
        tracing::debug!(base_url = %config.base_url, "parsed configuration");
        self.app = zlookup::initialize(&config);
        tracing::debug!("app state initialized");

        tracing::debug!("requesting permissions");
        request_permission(&[PermissionType::WebAccess]);

        tracing::debug!("subscribing to events");
        subscribe(&[
            EventType::Key,
            EventType::Timer,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for open pipe");
    }

    /// Handles incoming Zellij events.
    ///
    /// Translates Zellij events to library events, delegates to
    /// `handle_event`, and executes resulting actions. Returns `true` if the
    /// UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let span = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name);
        let _guard = span.entered();

        tracing::debug!(event = %event_name, "processing event");

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Timer(_elapsed) => Event::DebounceElapsed,
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_request_result(status, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => {
                Self::handle_permission_result(&permissions);
                return false;
            }
            _ => return false,
        };

        self.process_event(&our_event)
    }

    /// Handles pipe messages that open the overlays.
    ///
    /// Returns `true` if the plugin UI should re-render.
    fn pipe(&mut self, pipe_message: PipeMessage) -> bool {
        let span = tracing::debug_span!("plugin_pipe", pipe = %pipe_message.name);
        let _guard = span.entered();

        match pipe_message.name.as_str() {
            OPEN_PIPE => self.handle_open_pipe(&pipe_message),
            SMART_VALUES_PIPE => self.handle_smart_values_pipe(&pipe_message),
            _ => {
                tracing::debug!(pipe = %pipe_message.name, "ignoring unknown pipe");
                false
            }
        }
    }

    /// Renders the plugin UI.
    ///
    /// Delegates to the library's rendering layer.
    fn render(&mut self, rows: usize, cols: usize) {
        zlookup::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Runs one library event through the handler and executes its actions.
    fn process_event(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.app, event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for action in actions {
                    Self::execute_action(action);
                }
                should_render
            }
            Err(e) => {
                // This is the generic error surface: fetch and decode
                // failures land here and the previous render stays visible.
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events.
    ///
    /// The mapping is mode-aware: printable characters edit the query while
    /// typing but navigate while the result list has focus. While the
    /// smart-values tooltip is shown, every key dismisses it.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if self.app.smart_values.is_some() {
            return Some(Event::Escape);
        }

        if key.bare_key == BareKey::Char('n') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyDown);
        }
        if key.bare_key == BareKey::Char('p') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyUp);
        }

        Some(match key.bare_key {
            BareKey::Esc => Event::Escape,
            BareKey::Enter => Event::Activate,
            BareKey::Tab => Event::ToggleSource,
            BareKey::PageUp => Event::PagePrev,
            BareKey::PageDown => Event::PageNext,
            BareKey::Up => Event::KeyUp,
            BareKey::Down => match self.app.input_mode {
                InputMode::Typing => Event::FocusResults,
                InputMode::Navigating => Event::KeyDown,
            },
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) => match self.app.input_mode {
                InputMode::Typing => Event::Char(c),
                InputMode::Navigating => match c {
                    'j' => Event::KeyDown,
                    'k' => Event::KeyUp,
                    'h' => Event::PagePrev,
                    'l' => Event::PageNext,
                    '/' => Event::FocusQuery,
                    'q' => Event::CloseFocus,
                    _ => return None,
                },
            },
            _ => return None,
        })
    }

    /// Maps a web request result to a fetch completion event.
    ///
    /// Results whose context was not produced by this plugin are ignored.
    fn map_web_request_result(
        status: u16,
        body: Vec<u8>,
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        let Some(fetch_context) = FetchContext::from_map(context) else {
            tracing::debug!("web request result without fetch context, ignoring");
            return None;
        };

        tracing::debug!(
            kind = ?fetch_context.kind,
            generation = fetch_context.generation,
            status = status,
            body_len = body.len(),
            "fetch completed"
        );

        Some(Event::FetchCompleted {
            kind: fetch_context.kind,
            generation: fetch_context.generation,
            status,
            trace: fetch_context.trace,
            body,
        })
    }

    /// Handles permission request results.
    fn handle_permission_result(permissions: &PermissionStatus) {
        match permissions {
            PermissionStatus::Granted => {
                tracing::debug!("permissions granted");
            }
            PermissionStatus::Denied => {
                tracing::warn!("web access denied - lookups will not work");
            }
        }
    }

    /// Handles the `zlookup:open` pipe.
    ///
    /// # Arguments
    ///
    /// - `table` (required): name of the table to browse
    /// - `query`: initial query to seed the search field
    /// - `label_format`: opaque label format forwarded to the backend
    /// - `pick=true` (CLI pipes): hold the pipe open and write the selected
    ///   row back to it
    /// - `reply_to`: plugin message name to broadcast the selection under
    fn handle_open_pipe(&mut self, pipe_message: &PipeMessage) -> bool {
        let Some(table_name) = pipe_message.args.get("table") else {
            tracing::warn!("open pipe without table argument");
            if let PipeSource::Cli(pipe_name) = &pipe_message.source {
                unblock_cli_pipe_input(pipe_name);
            }
            return false;
        };

        let selection = match &pipe_message.source {
            PipeSource::Cli(pipe_name)
                if pipe_message.args.get("pick").is_some_and(|v| v == "true") =>
            {
                Some(SelectionTarget::CliPipe {
                    pipe_name: pipe_name.clone(),
                })
            }
            _ => pipe_message
                .args
                .get("reply_to")
                .map(|message_name| SelectionTarget::PluginMessage {
                    message_name: message_name.clone(),
                }),
        };

        // Browse-only CLI opens do not hold the pipe open.
        if let PipeSource::Cli(pipe_name) = &pipe_message.source {
            if !matches!(selection, Some(SelectionTarget::CliPipe { .. })) {
                unblock_cli_pipe_input(pipe_name);
            }
        }

        let event = Event::OpenBrowser {
            table_name: table_name.clone(),
            label_format: pipe_message.args.get("label_format").cloned(),
            initial_query: pipe_message.args.get("query").cloned(),
            selection,
        };

        self.process_event(&event)
    }

    /// Handles the `zlookup:smart-values` pipe.
    ///
    /// # Arguments
    ///
    /// - `type` (required): element type the values are computed for
    /// - `payload` (required): opaque element payload
    /// - `signature` (required): server-issued signature for the pair
    fn handle_smart_values_pipe(&mut self, pipe_message: &PipeMessage) -> bool {
        if let PipeSource::Cli(pipe_name) = &pipe_message.source {
            unblock_cli_pipe_input(pipe_name);
        }

        let (Some(value_type), Some(payload), Some(signature)) = (
            pipe_message.args.get("type"),
            pipe_message.args.get("payload"),
            pipe_message.args.get("signature"),
        ) else {
            tracing::warn!("smart-values pipe missing type/payload/signature arguments");
            return false;
        };

        let event = Event::OpenSmartValues {
            value_type: value_type.clone(),
            payload: payload.clone(),
            signature: signature.clone(),
        };

        self.process_event(&event)
    }

    /// Executes an action returned from event handling.
    ///
    /// Translates library actions to Zellij API calls.
    ///
    /// # Actions
    ///
    /// - `CloseFocus` / `Hide`: hide the plugin pane
    /// - `Show`: show the plugin pane (floating)
    /// - `Fetch`: issue a GET via the host's web-request support
    /// - `StartTimer`: arm one debounce timer
    /// - `DeliverSelection`: write the selection to its reply route
    /// - `ReleaseReply`: unblock an abandoned CLI reply pipe
    #[tracing::instrument(level = "debug")]
    fn execute_action(action: Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::Show => {
                show_self(true);
            }
            Action::Hide => {
                hide_self();
            }
            Action::Fetch { url, context } => {
                tracing::debug!(url = %url, "issuing web request");
                web_request(
                    url,
                    HttpVerb::Get,
                    BTreeMap::new(),
                    Vec::new(),
                    context.to_map(),
                );
            }
            Action::StartTimer { seconds } => {
                set_timeout(seconds);
            }
            Action::DeliverSelection {
                target,
                code,
                label,
            } => {
                let payload = serde_json::json!({ "code": code, "label": label }).to_string();
                match target {
                    SelectionTarget::CliPipe { pipe_name } => {
                        tracing::debug!(pipe = %pipe_name, "writing selection to cli pipe");
                        cli_pipe_output(&pipe_name, &format!("{payload}\n"));
                        unblock_cli_pipe_input(&pipe_name);
                    }
                    SelectionTarget::PluginMessage { message_name } => {
                        tracing::debug!(message = %message_name, "broadcasting selection");
                        pipe_message_to_plugin(
                            MessageToPlugin::new(&message_name).with_payload(payload),
                        );
                    }
                }
            }
            Action::ReleaseReply { target } => {
                if let SelectionTarget::CliPipe { pipe_name } = target {
                    tracing::debug!(pipe = %pipe_name, "releasing reply pipe without selection");
                    unblock_cli_pipe_input(&pipe_name);
                }
            }
        }
    }
}
