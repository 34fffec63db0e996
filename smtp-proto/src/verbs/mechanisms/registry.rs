//! The AUTH mechanism registry.
//!
//! Both built-in mechanisms are `tls_required = true`: the framework
//! refuses them outside TLS with `535 SSL/TLS connection required` before
//! the mechanism-specific exchange ever starts.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MechanismKind {
    Plain,
    Login,
}

/// `(name, kind, tls_required)`. Registered once; never mutated at
/// runtime. Names must be uppercase, contain no spaces, and be at most 71
/// bytes -- enforced on [`smtp_types::auth::AuthMechanismName`] rather than
/// here, since both literals already satisfy it.
pub const MECHANISM_REGISTRY: &[(&str, MechanismKind, bool)] = &[
    ("PLAIN", MechanismKind::Plain, true),
    ("LOGIN", MechanismKind::Login, true),
];

pub fn lookup(name: &str) -> Option<(MechanismKind, bool)> {
    MECHANISM_REGISTRY
        .iter()
        .find(|(n, _, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, kind, tls_required)| (*kind, *tls_required))
}

/// Mechanism names advertisable in the current TLS state: all of them once
/// TLS is active, only the non-TLS-required ones otherwise (here: none,
/// since both built-ins require TLS).
pub fn available_mechanisms(tls: bool) -> Vec<&'static str> {
    MECHANISM_REGISTRY
        .iter()
        .filter(|(_, _, tls_required)| tls || !tls_required)
        .map(|(name, _, _)| *name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_mechanisms_advertised_without_tls() {
        assert!(available_mechanisms(false).is_empty());
    }

    #[test]
    fn both_mechanisms_advertised_with_tls() {
        let mechs = available_mechanisms(true);
        assert!(mechs.contains(&"PLAIN"));
        assert!(mechs.contains(&"LOGIN"));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(lookup("plain"), Some((MechanismKind::Plain, true)));
        assert_eq!(lookup("bogus"), None);
    }

    /// Registration-time invariant: every registered name must satisfy
    /// `AuthMechanismName`'s uppercase/no-spaces/length rules. A real
    /// `debug_assert!` can't run over a `const` table at compile time since
    /// `TryFrom` isn't `const fn`, so this test stands in for it.
    #[test]
    fn registered_names_satisfy_auth_mechanism_name() {
        for (name, _, _) in MECHANISM_REGISTRY {
            assert!(
                smtp_types::auth::AuthMechanismName::try_from(*name).is_ok(),
                "registered mechanism name {name:?} is not a valid AuthMechanismName"
            );
        }
    }
}
