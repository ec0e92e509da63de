//! User-facing strings: page messages and the auth error translation table.
//!
//! Templates use `{name}` placeholders filled with `str::replace`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Root locale configuration (`data/locale.toml`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocaleConfig {
    #[serde(default)]
    pub messages: MessageLocale,

    #[serde(default)]
    pub auth_errors: AuthErrorLocale,
}

impl LocaleConfig {
    /// Load locale strings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load locale strings or fall back to the built-in French defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Locale load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }
}

/// Page and CLI messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageLocale {
    pub private_not_found: String,
    pub public_not_found: String,
    pub series_not_found: String,
    pub page_not_found: String,
    pub no_results: String,
    pub results_count: String,
    pub validate_starting: String,
    pub validate_success: String,
    pub validate_failed: String,
    pub dataset_counts: String,
    pub paths_header: String,
}

impl Default for MessageLocale {
    fn default() -> Self {
        Self {
            private_not_found: "Université privée introuvable.".into(),
            public_not_found: "Université publique introuvable pour cette série.".into(),
            series_not_found: "Série introuvable.".into(),
            page_not_found: "Page introuvable.".into(),
            no_results: "Aucun résultat pour « {query} ».".into(),
            results_count: "{count} résultat(s) pour « {query} »".into(),
            validate_starting: "Validation des données".into(),
            validate_success: "Données valides".into(),
            validate_failed: "Validation échouée : {error}".into(),
            dataset_counts:
                "{private} universités privées, {groups} séries publiques, {series} séries".into(),
            paths_header: "Chemins statiques ({count})".into(),
        }
    }
}

/// Translation table from auth provider error codes to display strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthErrorLocale {
    /// Message for codes missing from the table
    pub fallback: String,

    pub codes: BTreeMap<String, String>,
}

impl AuthErrorLocale {
    /// Display message for a provider error code.
    pub fn message(&self, code: &str) -> &str {
        self.codes
            .get(code.trim())
            .map(String::as_str)
            .unwrap_or(&self.fallback)
    }
}

impl Default for AuthErrorLocale {
    fn default() -> Self {
        let codes = [
            ("auth/user-not-found", "Aucun compte ne correspond à cet e-mail."),
            ("auth/wrong-password", "Mot de passe incorrect."),
            ("auth/invalid-credential", "E-mail ou mot de passe incorrect."),
            ("auth/email-already-in-use", "Cet e-mail est déjà utilisé."),
            ("auth/invalid-email", "Adresse e-mail invalide."),
            (
                "auth/weak-password",
                "Le mot de passe doit contenir au moins 6 caractères.",
            ),
            (
                "auth/too-many-requests",
                "Trop de tentatives. Réessayez plus tard.",
            ),
            (
                "auth/network-request-failed",
                "Erreur réseau. Vérifiez votre connexion.",
            ),
            ("auth/popup-closed-by-user", "Connexion annulée."),
            ("auth/user-disabled", "Ce compte a été désactivé."),
            (
                "auth/requires-recent-login",
                "Veuillez vous reconnecter pour continuer.",
            ),
        ]
        .into_iter()
        .map(|(code, message)| (code.to_string(), message.to_string()))
        .collect();

        Self {
            fallback: "Une erreur est survenue. Veuillez réessayer.".into(),
            codes,
        }
    }
}
