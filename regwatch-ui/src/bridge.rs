use chrono::{DateTime, Utc};
use js_sys::{Function, Promise, Reflect};
use regwatch_core::citations::CitationSink;
use regwatch_core::error::{StoreError, StoreResult};
use regwatch_core::filters::{FilterArgs, FILTER_ARGS_KEY};
use regwatch_core::model::Report;
use regwatch_core::store::KeyValueStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};

fn window() -> Result<web_sys::Window, String> {
    web_sys::window().ok_or_else(|| "window not available".to_string())
}

fn invoke_fn() -> Result<(JsValue, Function), String> {
    let window = window()?;
    let tauri = Reflect::get(&window, &JsValue::from_str("__TAURI__"))
        .map_err(|_| "failed to access __TAURI__".to_string())?;
    if tauri.is_undefined() || tauri.is_null() {
        return Err("Tauri bridge unavailable".into());
    }

    let direct = Reflect::get(&tauri, &JsValue::from_str("invoke")).ok();
    if let Some(v) = direct {
        if v.is_function() {
            return Ok((tauri, v.unchecked_into::<Function>()));
        }
    }

    let core = Reflect::get(&tauri, &JsValue::from_str("core"))
        .map_err(|_| "failed to access __TAURI__.core".to_string())?;
    let core_invoke = Reflect::get(&core, &JsValue::from_str("invoke"))
        .map_err(|_| "failed to access __TAURI__.core.invoke".to_string())?;
    if core_invoke.is_function() {
        return Ok((core, core_invoke.unchecked_into::<Function>()));
    }

    Err("no invoke function available".into())
}

pub async fn call<A, R>(cmd: &str, args: &A) -> Result<R, String>
where
    A: Serialize,
    R: DeserializeOwned,
{
    let (this_obj, invoke) = invoke_fn()?;
    let args = args
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| e.to_string())?;
    let js = invoke
        .call2(&this_obj, &JsValue::from_str(cmd), &args)
        .map_err(|e| format!("invoke failed: {e:?}"))?;
    let val = JsFuture::from(Promise::from(js))
        .await
        .map_err(|e| format!("invoke rejected: {e:?}"))?;
    serde_wasm_bindgen::from_value(val).map_err(|e| e.to_string())
}

pub fn desktop_available() -> bool {
    invoke_fn().is_ok()
}

pub async fn fetch_reports() -> Result<Vec<Report>, String> {
    call("list_reports_cmd", &()).await
}

pub async fn fetch_filter_args() -> Result<FilterArgs, String> {
    call("get_filter_args_cmd", &()).await
}

/// Current wall-clock time from the browser.
pub fn now() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

/// Sends citation actions to the host page.
///
/// Modals go through `window.__REGWATCH__.openModal(name, params)`; links open in a new tab.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserSink;

fn modal_fn() -> Result<(JsValue, Function), String> {
    let window = window()?;
    let host = Reflect::get(&window, &JsValue::from_str("__REGWATCH__"))
        .map_err(|_| "failed to access __REGWATCH__".to_string())?;
    if host.is_undefined() || host.is_null() {
        return Err("modal service unavailable".into());
    }
    let open = Reflect::get(&host, &JsValue::from_str("openModal"))
        .map_err(|_| "failed to access __REGWATCH__.openModal".to_string())?;
    if !open.is_function() {
        return Err("__REGWATCH__.openModal is not a function".into());
    }
    Ok((host, open.unchecked_into::<Function>()))
}

impl CitationSink for BrowserSink {
    fn open_modal(&self, name: &str, params: serde_json::Value) {
        let result = modal_fn().and_then(|(host, open)| {
            let params = params
                .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
                .map_err(|e| e.to_string())?;
            open.call2(&host, &JsValue::from_str(name), &params)
                .map(|_| ())
                .map_err(|e| format!("openModal failed: {e:?}"))
        });
        if let Err(err) = result {
            tracing::warn!(modal = name, error = %err, "could not open modal");
        }
    }

    fn open_url(&self, url: &str) {
        let result = window().and_then(|w| {
            w.open_with_url_and_target(url, "_blank")
                .map(|_| ())
                .map_err(|e| format!("window.open failed: {e:?}"))
        });
        if let Err(err) = result {
            tracing::warn!(%url, error = %err, "could not open link");
        }
    }
}

/// `window.localStorage` as a key-value store.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage(&self) -> StoreResult<web_sys::Storage> {
        window()
            .map_err(StoreError::Unavailable)?
            .local_storage()
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| StoreError::Unavailable("localStorage disabled".into()))
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> StoreResult<Option<serde_json::Value>> {
        let raw = self
            .storage()?
            .get_item(key)
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))?;
        raw.map(|s| serde_json::from_str(&s).map_err(StoreError::from))
            .transpose()
    }

    fn set(&self, key: &str, value: &serde_json::Value) -> StoreResult<()> {
        let raw = serde_json::to_string(value)?;
        self.storage()?
            .set_item(key, &raw)
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))
    }
}

/// Command and payload that mirror a store write into the desktop shell, if any.
fn desktop_write(key: &str, value: &serde_json::Value) -> Option<(&'static str, serde_json::Value)> {
    if key != FILTER_ARGS_KEY {
        return None;
    }
    let mut payload = serde_json::Map::new();
    payload.insert("args".into(), value.clone());
    Some(("save_filter_args_cmd", serde_json::Value::Object(payload)))
}

/// Settings store for the app.
///
/// Reads come from the `localStorage` cache. Writes land there too and, inside
/// the desktop window, are forwarded to the shell's SQLite store.
#[derive(Clone, Copy, Debug, Default)]
pub struct BridgeStore;

impl KeyValueStore for BridgeStore {
    fn get(&self, key: &str) -> StoreResult<Option<serde_json::Value>> {
        LocalStorageStore.get(key)
    }

    fn set(&self, key: &str, value: &serde_json::Value) -> StoreResult<()> {
        let cached = LocalStorageStore.set(key, value);
        if desktop_available() {
            if let Some((cmd, payload)) = desktop_write(key, value) {
                spawn_local(async move {
                    if let Err(err) = call::<_, ()>(cmd, &payload).await {
                        tracing::warn!(%cmd, error = %err, "desktop store write failed");
                    }
                });
            }
        }
        cached
    }
}
