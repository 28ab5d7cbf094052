//! Global language state.
//!
//! One process-wide singleton owns the active language pack and locale
//! configuration. Both are populated on startup and replaced wholesale on a
//! language/profile switch; renders snapshot what they need, so a switch
//! never mutates anything mid-render.

use std::sync::{OnceLock, RwLock};

use tracing::{debug, warn};

use midway_format::{
    ArgBuffer, Arguments, Error, FmtString, LocaleConfig, Renderer, StringId,
};

use crate::catalog::LanguagePack;
use crate::LangError;

/// Global language state singleton.
static LANG_STATE: OnceLock<LangState> = OnceLock::new();

/// Runtime language state: active pack plus locale configuration.
pub struct LangState {
    pack: RwLock<LanguagePack>,
    locale: RwLock<LocaleConfig>,
}

impl LangState {
    /// Initialize the global state.
    ///
    /// Safe to call multiple times; the first call wins.
    pub fn init() {
        let st = LangState {
            pack: RwLock::new(LanguagePack::new()),
            locale: RwLock::new(LocaleConfig::default()),
        };
        let _ = LANG_STATE.set(st);
    }

    pub fn get() -> &'static LangState {
        LANG_STATE
            .get()
            .expect("LangState not initialized. Call LangState::init() at app startup.")
    }

    pub fn try_get() -> Option<&'static LangState> {
        LANG_STATE.get()
    }

    /// Replace the active language pack.
    pub fn set_pack(&self, pack: LanguagePack) {
        debug!(entries = pack.len(), "LangState::set_pack");
        *self.pack.write().unwrap() = pack;
    }

    /// Parse and load a language pack from catalog text.
    pub fn load_pack_str(&self, src: &str) -> Result<(), LangError> {
        let pack = LanguagePack::parse(src)?;
        self.set_pack(pack);
        Ok(())
    }

    /// Replace the active locale configuration. Takes effect for subsequent
    /// renders only.
    pub fn set_locale(&self, locale: LocaleConfig) {
        debug!("LangState::set_locale");
        *self.locale.write().unwrap() = locale;
    }

    /// Snapshot of the active locale configuration.
    pub fn locale(&self) -> LocaleConfig {
        self.locale.read().unwrap().clone()
    }

    /// Resolve and render a string id. Soft-fails to empty text so a bad
    /// pack entry never takes the UI down.
    pub fn format_string(&self, id: StringId, args: &Arguments) -> String {
        let locale = self.locale();
        let pack = self.pack.read().unwrap();
        match Renderer::new(&*pack, &locale).render_id(id, args) {
            Ok(text) => text,
            Err(e) => {
                warn!(id, error = %e, "format_string failed");
                String::new()
            }
        }
    }

    /// Render a raw format string (not pack-resolved) against `args`.
    pub fn format_raw(&self, fmt: &str, args: &Arguments) -> String {
        let locale = self.locale();
        let pack = self.pack.read().unwrap();
        match Renderer::new(&*pack, &locale).render(&FmtString::new(fmt), args) {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "format_raw failed");
                String::new()
            }
        }
    }

    /// Decode a legacy argument buffer for `id` and render the result.
    pub fn format_legacy_buffer(
        &self,
        id: StringId,
        cursor: &mut ArgBuffer<'_>,
    ) -> Result<String, Error> {
        let locale = self.locale();
        let pack = self.pack.read().unwrap();
        Renderer::new(&*pack, &locale).render_legacy(id, cursor)
    }
}

/// Render a string id via the global state.
///
/// Degrades gracefully when the state isn't initialized: returns empty text.
pub fn format_string(id: StringId, args: &Arguments) -> String {
    match LangState::try_get() {
        Some(st) => st.format_string(id, args),
        None => String::new(),
    }
}
