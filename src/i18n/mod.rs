//! i18n - User-Facing Message Localization
//!
//! Spanish-first lookup for validation and status messages, with English as
//! the secondary locale.

use std::sync::OnceLock;

use ahash::AHashMap;

/// Supported locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    /// Spanish
    #[default]
    Es,
    /// English
    En,
}

impl Locale {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Locale::Es => "Español",
            Locale::En => "English",
        }
    }
}

/// Translation resources
static TRANSLATIONS: OnceLock<AHashMap<&'static str, (&'static str, &'static str)>> =
    OnceLock::new();

/// Initialize translations (key -> (es, en))
fn init_translations() -> AHashMap<&'static str, (&'static str, &'static str)> {
    let mut map = AHashMap::new();

    // Validation
    map.insert("field-required", ("Este campo es obligatorio", "This field is required"));
    map.insert(
        "step-incomplete",
        ("Complete los campos obligatorios para continuar", "Fill the required fields to continue"),
    );
    map.insert(
        "file-too-large",
        ("El archivo supera el tamaño máximo de 5 MB", "The file exceeds the 5 MB limit"),
    );

    // Submission
    map.insert("submitting", ("Enviando solicitud...", "Submitting application..."));
    map.insert(
        "submit-success",
        ("Solicitud enviada correctamente", "Application submitted successfully"),
    );
    map.insert(
        "submit-error",
        ("No se pudo enviar la solicitud, intente de nuevo", "Could not submit, please try again"),
    );
    map.insert(
        "submit-partial",
        (
            "La solicitud se creó pero los documentos no se cargaron",
            "The application was created but documents failed to upload",
        ),
    );
    map.insert(
        "rate-limited",
        ("Demasiadas solicitudes, espere un momento", "Too many requests, wait a moment"),
    );

    // Content pages
    map.insert("loading", ("Cargando...", "Loading..."));
    map.insert("no-data", ("Sin datos", "No data"));
    map.insert(
        "load-error",
        ("No se pudo cargar el contenido", "Content could not be loaded"),
    );

    map
}

fn translations() -> &'static AHashMap<&'static str, (&'static str, &'static str)> {
    TRANSLATIONS.get_or_init(init_translations)
}

/// Translate a key; unknown keys fall back to the key itself
pub fn t(locale: Locale, key: &str) -> String {
    match translations().get(key) {
        Some(&(es, en)) => match locale {
            Locale::Es => es.to_string(),
            Locale::En => en.to_string(),
        },
        None => key.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_key_both_locales() {
        assert_eq!(t(Locale::Es, "no-data"), "Sin datos");
        assert_eq!(t(Locale::En, "no-data"), "No data");
    }

    #[test]
    fn test_unknown_key_falls_back() {
        assert_eq!(t(Locale::Es, "missing-key"), "missing-key");
    }
}
