//! Static lookup tables keyed by failure kind and code.
//!
//! Messages are short imperative sentences safe to show to an apprentice.
//! Tables are built once on first use and never mutated.

use std::collections::{HashMap, HashSet};

use domain::codes::{
    DATA_FORMAT_ERROR, DATA_STATE_ERROR, DB_SYSTEM_ERROR, NET_TIMEOUT, STOR_SYSTEM_ERROR,
    SYSTEM_UNEXPECTED_ERROR, VAL_SYSTEM_ERROR,
};
use domain::FailureKind;
use once_cell::sync::Lazy;

/// Shown when nothing more specific is known.
pub const GENERIC_MESSAGE: &str = "Something went wrong. Please try again.";

/// Fallback suggestions when no table entry applies.
pub const GENERIC_SUGGESTIONS: &[&str] = &[
    "Try again",
    "Contact support if the problem persists",
];

/// The single suggestion for validation failures.
pub const VALIDATION_SUGGESTION: &str = "Correct the highlighted fields and submit again";

/// Everything the handler knows about one failure kind.
pub struct KindCatalog {
    pub generic_message: &'static str,
    messages: HashMap<&'static str, &'static str>,
    non_recoverable: HashSet<&'static str>,
    never_recoverable: bool,
    suggestions: HashMap<&'static str, &'static [&'static str]>,
    default_suggestions: &'static [&'static str],
}

impl KindCatalog {
    pub fn message(&self, code: &str) -> Option<&'static str> {
        self.messages.get(code).copied()
    }

    /// Unknown codes are recoverable unless the whole kind never is.
    pub fn is_recoverable(&self, code: &str) -> bool {
        !self.never_recoverable && !self.non_recoverable.contains(code)
    }

    pub fn suggestions(&self, code: &str) -> &'static [&'static str] {
        self.suggestions
            .get(code)
            .copied()
            .unwrap_or(self.default_suggestions)
    }

    pub fn knows(&self, code: &str) -> bool {
        self.messages.contains_key(code)
    }
}

pub fn catalog(kind: FailureKind) -> &'static KindCatalog {
    match kind {
        FailureKind::Auth => &AUTH,
        FailureKind::Database => &DATABASE,
        FailureKind::Validation => &VALIDATION,
        FailureKind::Data => &DATA,
        FailureKind::Storage => &STORAGE,
        FailureKind::Network => &NETWORK,
        FailureKind::Configuration => &CONFIGURATION,
    }
}

static DATABASE: Lazy<KindCatalog> = Lazy::new(|| KindCatalog {
    generic_message: "A database error occurred. Please try again.",
    messages: HashMap::from([
        ("DB_001", "Unable to load your data. Please try again."),
        ("DB_002", "Unable to connect to the local database. Please restart the app."),
        ("DB_003", "Your changes could not be saved. Please try again."),
        ("DB_004", "The app could not update its database. Please reinstall or contact support."),
        ("DB_005", "This entry conflicts with existing data. Please review it."),
        ("DB_006", "The requested entry could not be found."),
        ("DB_007", "This entry already exists."),
        ("DB_008", "Your local data appears to be damaged. Please contact support."),
        (DB_SYSTEM_ERROR, "A database error occurred. Please restart the app."),
    ]),
    non_recoverable: HashSet::from(["DB_004", "DB_005", "DB_007", "DB_008"]),
    never_recoverable: false,
    suggestions: HashMap::from([
        ("DB_002", &["Close and reopen the app", "Restart your device"] as &[_]),
        ("DB_004", &["Update the app to the latest version", "Contact support"] as &[_]),
        ("DB_005", &["Check the entry for duplicates"] as &[_]),
        ("DB_006", &["Refresh the list and try again"] as &[_]),
        ("DB_007", &["Edit the existing entry instead"] as &[_]),
        ("DB_008", &["Contact support", "Reinstall the app"] as &[_]),
    ]),
    default_suggestions: &["Try again", "Restart the app if the problem persists"],
});

static AUTH: Lazy<KindCatalog> = Lazy::new(|| KindCatalog {
    generic_message: "There was a problem with your account. Please sign in again.",
    messages: HashMap::from([
        ("AUTH_001", "Please sign in to continue."),
        ("AUTH_002", "The sign-in details are incorrect. Please try again."),
        ("AUTH_003", "Your session has expired. Please sign in again."),
        ("AUTH_004", "You do not have permission to do this."),
        ("AUTH_005", "Your account is locked. Please contact support."),
        ("AUTH_006", "No account was found for these details."),
        ("AUTH_007", "Please finish setting up your profile first."),
        ("AUTH_008", "Sign-in is currently unavailable. Please try again later."),
    ]),
    non_recoverable: HashSet::from(["AUTH_004", "AUTH_005"]),
    never_recoverable: false,
    suggestions: HashMap::from([
        ("AUTH_002", &["Check your email and password", "Reset your password"] as &[_]),
        ("AUTH_003", &["Sign in again"] as &[_]),
        ("AUTH_004", &["Ask your trainer for access"] as &[_]),
        ("AUTH_005", &["Contact support to unlock your account"] as &[_]),
        ("AUTH_006", &["Check the email address", "Create a new account"] as &[_]),
        ("AUTH_007", &["Complete the onboarding steps"] as &[_]),
        ("AUTH_008", &["Wait a moment and try again"] as &[_]),
    ]),
    default_suggestions: &["Sign in again", "Contact support if the problem persists"],
});

static VALIDATION: Lazy<KindCatalog> = Lazy::new(|| KindCatalog {
    generic_message: "Please check your input and try again.",
    messages: HashMap::from([
        ("VAL_001", "Please fill in all required fields."),
        ("VAL_002", "Some fields have an invalid format."),
        ("VAL_003", "Some fields are too short or too long."),
        ("VAL_004", "Some values are out of range."),
        ("VAL_005", "Please enter a valid date."),
        ("VAL_006", "Please enter a valid email address."),
        ("VAL_007", "Please choose one of the available options."),
        ("VAL_008", "Please correct the highlighted fields."),
        (VAL_SYSTEM_ERROR, "The request contained an invalid value."),
    ]),
    non_recoverable: HashSet::new(),
    never_recoverable: true,
    suggestions: HashMap::new(),
    default_suggestions: &[VALIDATION_SUGGESTION],
});

static DATA: Lazy<KindCatalog> = Lazy::new(|| KindCatalog {
    generic_message: "There was a problem with your data. Please try again.",
    messages: HashMap::from([
        ("DATA_001", "The requested information could not be found."),
        ("DATA_002", "Some information could not be read."),
        ("DATA_003", "Your information could not be saved in the right format."),
        ("DATA_004", "This action is not possible right now."),
        ("DATA_005", "This entry was changed elsewhere. Please refresh."),
        ("DATA_006", "Some of your data appears to be damaged."),
        ("DATA_007", "Some information is missing."),
        (DATA_FORMAT_ERROR, "Some information is in an unexpected format."),
        (DATA_STATE_ERROR, "This action is not possible right now. Please try again."),
        (SYSTEM_UNEXPECTED_ERROR, "Something unexpected happened. Please try again."),
    ]),
    non_recoverable: HashSet::from(["DATA_002", "DATA_006", DATA_FORMAT_ERROR]),
    never_recoverable: false,
    suggestions: HashMap::from([
        ("DATA_001", &["Refresh and try again"] as &[_]),
        ("DATA_005", &["Refresh to load the latest version"] as &[_]),
        ("DATA_006", &["Contact support"] as &[_]),
        ("DATA_007", &["Fill in the missing information"] as &[_]),
    ]),
    default_suggestions: GENERIC_SUGGESTIONS,
});

static STORAGE: Lazy<KindCatalog> = Lazy::new(|| KindCatalog {
    generic_message: "A storage error occurred. Please try again.",
    messages: HashMap::from([
        ("STOR_001", "Unable to read saved data. Please try again."),
        ("STOR_002", "Unable to save your data. Please try again."),
        ("STOR_003", "Unable to delete this entry. Please try again."),
        ("STOR_004", "Your device is out of storage space."),
        ("STOR_005", "The app does not have permission to access storage."),
        ("STOR_006", "The saved item could not be found."),
        ("STOR_007", "Saved data appears to be damaged."),
        (STOR_SYSTEM_ERROR, "A file could not be accessed. Please try again."),
    ]),
    non_recoverable: HashSet::from(["STOR_004", "STOR_005", "STOR_007"]),
    never_recoverable: false,
    suggestions: HashMap::from([
        ("STOR_004", &["Free up space on your device", "Delete unused apps or files"] as &[_]),
        ("STOR_005", &["Allow storage access in your device settings"] as &[_]),
        ("STOR_007", &["Contact support", "Reinstall the app"] as &[_]),
    ]),
    default_suggestions: &["Try again", "Restart the app if the problem persists"],
});

static NETWORK: Lazy<KindCatalog> = Lazy::new(|| KindCatalog {
    generic_message: "A connection error occurred. Please try again.",
    messages: HashMap::from([
        ("NET_001", "No internet connection. Please check your network."),
        ("NET_002", "The request took too long. Please try again."),
        ("NET_003", "The server had a problem. Please try again later."),
        ("NET_004", "The request could not be processed."),
        ("NET_005", "Please sign in again."),
        ("NET_006", "The requested information could not be found."),
        ("NET_007", "Too many requests. Please wait a moment."),
        ("NET_008", "The service is temporarily unavailable. Please try again later."),
        (NET_TIMEOUT, "The operation took too long. Please try again."),
    ]),
    non_recoverable: HashSet::from(["NET_004", "NET_005", "NET_006"]),
    never_recoverable: false,
    suggestions: HashMap::from([
        ("NET_001", &["Check your Wi-Fi or mobile data", "Try again when you are online"] as &[_]),
        ("NET_002", &["Check your connection speed", "Try again"] as &[_]),
        ("NET_005", &["Sign in again"] as &[_]),
        ("NET_007", &["Wait a minute before trying again"] as &[_]),
        (NET_TIMEOUT, &["Check your connection speed", "Try again"] as &[_]),
    ]),
    default_suggestions: &["Check your connection", "Try again later"],
});

static CONFIGURATION: Lazy<KindCatalog> = Lazy::new(|| KindCatalog {
    generic_message: "The app is not set up correctly. Please restart the app.",
    messages: HashMap::from([
        ("CONF_001", "The app is missing required settings. Please reinstall."),
        ("CONF_002", "The app settings are invalid. Please restart the app."),
        ("CONF_003", "The app settings could not be loaded. Please restart the app."),
        ("CONF_004", "This version of the app does not match its environment."),
        ("CONF_005", "This feature is not available."),
        ("CONF_006", "Please update the app to continue."),
    ]),
    non_recoverable: HashSet::new(),
    never_recoverable: true,
    suggestions: HashMap::from([
        ("CONF_005", &["Check for an app update"] as &[_]),
        ("CONF_006", &["Update the app from the store"] as &[_]),
    ]),
    default_suggestions: &["Restart the app", "Contact support if the problem persists"],
});
