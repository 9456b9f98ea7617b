//! Validated value types.
//!
//! Each wrapper can only be built through its fallible constructor, so
//! holding one proves the raw string passed the corresponding check.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

/// Why a raw string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// The validation kind name is not part of the validator set.
    #[error("unknown validation type: '{0}'")]
    UnknownKind(String),
    /// The value does not satisfy the validator.
    #[error("{0}")]
    Invalid(String),
}

impl ValueError {
    fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }

    /// Attach the field and offending value.
    pub fn for_field(self, field: &str, value: &str) -> crate::error::InscribeError {
        match self {
            Self::UnknownKind(kind) => crate::error::InscribeError::UnknownValidation { kind },
            Self::Invalid(message) => crate::error::InscribeError::ValidationError {
                field: field.to_string(),
                value: value.to_string(),
                message,
            },
        }
    }
}

macro_rules! validated_value {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name(String);

        impl $name {
            /// The validated string.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

validated_value!(
    /// RFC 1123 DNS label.
    DnsName
);
validated_value!(
    /// Non-negative base-10 integer.
    NonNegativeInteger
);
validated_value!(
    /// String with at least one non-whitespace character.
    NonEmptyString
);
validated_value!(
    /// TCP/UDP port, 1 to 65535.
    Port
);
validated_value!(
    /// Kubernetes memory quantity such as `256Mi`.
    MemoryQuantity
);
validated_value!(
    /// Kubernetes CPU quantity such as `500m`.
    CpuQuantity
);
validated_value!(
    /// Standard five-field cron expression.
    CronSchedule
);
validated_value!(
    /// Output file name without separators or traversal.
    Filename
);
validated_value!(
    /// Non-blank filesystem path.
    FsPath
);

static DNS_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([a-z0-9\-]{0,61}[a-z0-9])?$").expect("DNS_NAME_REGEX must compile")
});

static MEMORY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]+(\.[0-9]+)?(Ki|Mi|Gi|Ti|Pi|Ei|k|M|G|T|P|E)?$")
        .expect("MEMORY_REGEX must compile")
});

static CPU_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)?m?$").expect("CPU_REGEX must compile"));

static CRON_FIELD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\*|[0-9]+(-[0-9]+)?)(/[0-9]+)?(,(\*|[0-9]+(-[0-9]+)?)(/[0-9]+)?)*$")
        .expect("CRON_FIELD_REGEX must compile")
});

impl DnsName {
    pub fn new(s: &str) -> Result<Self, ValueError> {
        if s.is_empty() {
            return Err(ValueError::invalid("dns name cannot be empty"));
        }
        if s.len() > 63 {
            return Err(ValueError::invalid("dns name must be 63 characters or fewer"));
        }
        if !DNS_NAME_REGEX.is_match(s) {
            return Err(ValueError::invalid(
                "must be a valid dns name: lowercase alphanumeric and hyphens, must start and end with alphanumeric",
            ));
        }
        Ok(Self(s.to_string()))
    }
}

impl NonNegativeInteger {
    pub fn new(s: &str) -> Result<Self, ValueError> {
        if s.is_empty() {
            return Err(ValueError::invalid("integer value cannot be empty"));
        }
        let n: i64 = s
            .parse()
            .map_err(|_| ValueError::invalid("must be a valid integer"))?;
        if n < 0 {
            return Err(ValueError::invalid("must be a non-negative integer"));
        }
        Ok(Self(s.to_string()))
    }
}

impl NonEmptyString {
    pub fn new(s: &str) -> Result<Self, ValueError> {
        if s.trim().is_empty() {
            return Err(ValueError::invalid("value cannot be empty"));
        }
        Ok(Self(s.to_string()))
    }
}

impl Port {
    pub fn new(s: &str) -> Result<Self, ValueError> {
        if s.is_empty() {
            return Err(ValueError::invalid("port cannot be empty"));
        }
        let n: i64 = s
            .parse()
            .map_err(|_| ValueError::invalid("port must be a valid integer"))?;
        if !(1..=65535).contains(&n) {
            return Err(ValueError::invalid("port must be between 1 and 65535"));
        }
        Ok(Self(s.to_string()))
    }

    /// Numeric port.
    pub fn number(&self) -> u16 {
        // Range checked in `new`.
        self.0.parse().unwrap_or_default()
    }
}

impl MemoryQuantity {
    pub fn new(s: &str) -> Result<Self, ValueError> {
        if s.is_empty() {
            return Err(ValueError::invalid("memory value cannot be empty"));
        }
        if !MEMORY_REGEX.is_match(s) {
            return Err(ValueError::invalid(
                "must be a valid memory quantity (e.g., 256Mi, 1Gi)",
            ));
        }
        Ok(Self(s.to_string()))
    }
}

impl CpuQuantity {
    pub fn new(s: &str) -> Result<Self, ValueError> {
        if s.is_empty() {
            return Err(ValueError::invalid("cpu value cannot be empty"));
        }
        if !CPU_REGEX.is_match(s) {
            return Err(ValueError::invalid(
                "must be a valid cpu quantity (e.g., 100m, 0.5, 2)",
            ));
        }
        Ok(Self(s.to_string()))
    }
}

impl CronSchedule {
    pub fn new(s: &str) -> Result<Self, ValueError> {
        if s.trim().is_empty() {
            return Err(ValueError::invalid("cron schedule cannot be empty"));
        }
        let fields: Vec<&str> = s.split_whitespace().collect();
        if fields.len() != 5 {
            return Err(ValueError::invalid(
                "cron schedule must have exactly 5 fields (minute hour day month weekday)",
            ));
        }
        if let Some(bad) = fields.iter().find(|f| !CRON_FIELD_REGEX.is_match(f)) {
            return Err(ValueError::Invalid(format!(
                "invalid cron field '{}': must contain numbers, *, -, /, or ,",
                bad
            )));
        }
        Ok(Self(s.to_string()))
    }
}

impl Filename {
    /// Surrounding whitespace is trimmed before checking.
    pub fn new(s: &str) -> Result<Self, ValueError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValueError::invalid("filename cannot be empty"));
        }
        if s.contains('/') || s.contains('\\') {
            return Err(ValueError::invalid(
                "filename must not contain path separators",
            ));
        }
        if s.starts_with("..") {
            return Err(ValueError::invalid("filename must not contain path traversal"));
        }
        Ok(Self(s.to_string()))
    }
}

impl FsPath {
    pub fn new(s: &str) -> Result<Self, ValueError> {
        if s.trim().is_empty() {
            return Err(ValueError::invalid("path cannot be empty"));
        }
        Ok(Self(s.to_string()))
    }
}

/// A value that passed one of the validators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedValue {
    DnsName(DnsName),
    Integer(NonNegativeInteger),
    String(NonEmptyString),
    Port(Port),
    Memory(MemoryQuantity),
    Cpu(CpuQuantity),
    Cron(CronSchedule),
    Filename(Filename),
    Path(FsPath),
}

impl ValidatedValue {
    pub fn as_str(&self) -> &str {
        match self {
            Self::DnsName(v) => v.as_str(),
            Self::Integer(v) => v.as_str(),
            Self::String(v) => v.as_str(),
            Self::Port(v) => v.as_str(),
            Self::Memory(v) => v.as_str(),
            Self::Cpu(v) => v.as_str(),
            Self::Cron(v) => v.as_str(),
            Self::Filename(v) => v.as_str(),
            Self::Path(v) => v.as_str(),
        }
    }
}

impl fmt::Display for ValidatedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build a validated value from a validation kind name and a raw string.
pub fn parse_value(kind: &str, raw: &str) -> Result<ValidatedValue, ValueError> {
    match kind {
        "dns-name" | "dns-label" => DnsName::new(raw).map(ValidatedValue::DnsName),
        "integer" => NonNegativeInteger::new(raw).map(ValidatedValue::Integer),
        "string" => NonEmptyString::new(raw).map(ValidatedValue::String),
        "port" => Port::new(raw).map(ValidatedValue::Port),
        "memory" => MemoryQuantity::new(raw).map(ValidatedValue::Memory),
        "cpu" => CpuQuantity::new(raw).map(ValidatedValue::Cpu),
        "cron-schedule" => CronSchedule::new(raw).map(ValidatedValue::Cron),
        "filename" => Filename::new(raw).map(ValidatedValue::Filename),
        "path" => FsPath::new(raw).map(ValidatedValue::Path),
        other => Err(ValueError::UnknownKind(other.to_string())),
    }
}
