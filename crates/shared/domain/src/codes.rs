//! Stable machine-readable error codes.
//!
//! Each exception variant owns a private namespace of codes rendered as
//! `<PREFIX>_<NNN>`. Codes select user messages, recoverability and recovery
//! suggestions without depending on free-text messages, so once published a
//! code must never be renumbered.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Returned when a string does not name a code in the requested namespace.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown error code: {0}")]
pub struct UnknownCode(pub String);

macro_rules! error_codes {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $code:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every code in this namespace, in numeric order.
            pub const ALL: &'static [$name] = &[ $( $name::$variant, )+ ];

            /// Machine-readable identifier.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $code, )+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownCode;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $code => Ok($name::$variant), )+
                    _ => Err(UnknownCode(s.to_string())),
                }
            }
        }
    };
}

error_codes! {
    /// Local database codes (`DB_*`).
    DatabaseCode {
        QueryFailed => "DB_001",
        ConnectionFailed => "DB_002",
        TransactionFailed => "DB_003",
        MigrationFailed => "DB_004",
        ConstraintViolation => "DB_005",
        RecordNotFound => "DB_006",
        DuplicateRecord => "DB_007",
        Corrupted => "DB_008",
    }
}

error_codes! {
    /// Authentication and session codes (`AUTH_*`).
    AuthCode {
        NotAuthenticated => "AUTH_001",
        InvalidCredentials => "AUTH_002",
        SessionExpired => "AUTH_003",
        PermissionDenied => "AUTH_004",
        AccountLocked => "AUTH_005",
        UserNotFound => "AUTH_006",
        OnboardingIncomplete => "AUTH_007",
        ProviderUnavailable => "AUTH_008",
    }
}

error_codes! {
    /// Input validation codes (`VAL_*`).
    ValidationCode {
        RequiredField => "VAL_001",
        InvalidFormat => "VAL_002",
        InvalidLength => "VAL_003",
        OutOfRange => "VAL_004",
        InvalidDate => "VAL_005",
        InvalidEmail => "VAL_006",
        InvalidSelection => "VAL_007",
        /// Several fields failed at once; see the field errors.
        FormInvalid => "VAL_008",
    }
}

error_codes! {
    /// Data integrity and parsing codes (`DATA_*`).
    DataCode {
        NotFound => "DATA_001",
        ParseFailed => "DATA_002",
        SerializationFailed => "DATA_003",
        InvalidState => "DATA_004",
        Conflict => "DATA_005",
        Corrupted => "DATA_006",
        Incomplete => "DATA_007",
    }
}

error_codes! {
    /// On-device key/value and file storage codes (`STOR_*`).
    StorageCode {
        ReadFailed => "STOR_001",
        WriteFailed => "STOR_002",
        DeleteFailed => "STOR_003",
        InsufficientSpace => "STOR_004",
        PermissionDenied => "STOR_005",
        KeyNotFound => "STOR_006",
        Corrupted => "STOR_007",
    }
}

error_codes! {
    /// Connectivity codes (`NET_*`).
    NetworkCode {
        NoConnection => "NET_001",
        Timeout => "NET_002",
        ServerError => "NET_003",
        BadRequest => "NET_004",
        Unauthorized => "NET_005",
        NotFound => "NET_006",
        RateLimited => "NET_007",
        ServiceUnavailable => "NET_008",
    }
}

error_codes! {
    /// Application configuration codes (`CONF_*`).
    ConfigurationCode {
        Missing => "CONF_001",
        Invalid => "CONF_002",
        LoadFailed => "CONF_003",
        EnvironmentMismatch => "CONF_004",
        FeatureDisabled => "CONF_005",
        VersionIncompatible => "CONF_006",
    }
}

// Codes assigned to errors that did not originate as domain exceptions.

/// Storage engine failure outside the domain taxonomy.
pub const DB_SYSTEM_ERROR: &str = "DB_SYSTEM_ERROR";
/// Filesystem failure outside the domain taxonomy.
pub const STOR_SYSTEM_ERROR: &str = "STOR_SYSTEM_ERROR";
/// Malformed data that failed to parse.
pub const DATA_FORMAT_ERROR: &str = "DATA_FORMAT_ERROR";
/// Invalid argument passed to a lower layer.
pub const VAL_SYSTEM_ERROR: &str = "VAL_SYSTEM_ERROR";
/// Operation attempted in an invalid state.
pub const DATA_STATE_ERROR: &str = "DATA_STATE_ERROR";
/// Operation exceeded its deadline.
pub const NET_TIMEOUT: &str = "NET_TIMEOUT";
/// Anything the handler could not classify.
pub const SYSTEM_UNEXPECTED_ERROR: &str = "SYSTEM_UNEXPECTED_ERROR";
/// Lookup key used when a failure carries no code.
pub const UNKNOWN: &str = "UNKNOWN";
