//! The validator set: validation kind name to check function.

use super::value::{
    CpuQuantity, CronSchedule, DnsName, Filename, FsPath, MemoryQuantity, NonEmptyString,
    NonNegativeInteger, Port, ValueError,
};

/// Pure check over a raw string.
pub type Validator = fn(&str) -> Result<(), ValueError>;

fn discard<T>(r: Result<T, ValueError>) -> Result<(), ValueError> {
    r.map(|_| ())
}

const VALIDATORS: &[(&str, Validator)] = &[
    ("dns-name", |s| discard(DnsName::new(s))),
    ("dns-label", |s| discard(DnsName::new(s))),
    ("integer", |s| discard(NonNegativeInteger::new(s))),
    ("string", |s| discard(NonEmptyString::new(s))),
    ("port", |s| discard(Port::new(s))),
    ("memory", |s| discard(MemoryQuantity::new(s))),
    ("cpu", |s| discard(CpuQuantity::new(s))),
    ("cron-schedule", |s| discard(CronSchedule::new(s))),
    ("filename", |s| discard(Filename::new(s))),
    ("path", |s| discard(FsPath::new(s))),
];

/// Look up the validator for a kind.
pub fn validator(kind: &str) -> Option<Validator> {
    VALIDATORS
        .iter()
        .find(|(name, _)| *name == kind)
        .map(|(_, f)| *f)
}

/// Check `value` against the validator named `kind`.
pub fn validate(kind: &str, value: &str) -> Result<(), ValueError> {
    let check = validator(kind).ok_or_else(|| ValueError::UnknownKind(kind.to_string()))?;
    check(value)
}

/// All known validation kind names.
pub fn validation_kinds() -> impl Iterator<Item = &'static str> {
    VALIDATORS.iter().map(|(name, _)| *name)
}
