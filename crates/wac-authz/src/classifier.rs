//! Access mode classification.

use wac_core::{AccessMode, AclMapping, RequestMethod, ResourceId};

/// Returns true if `resource` is itself an ACL document.
///
/// A resource is an ACL document exactly when mapping it to its ACL is the
/// identity.
pub fn is_control_request(mapping: &dyn AclMapping, resource: &ResourceId) -> bool {
    mapping.to_acl(resource) == *resource
}

/// Maps a request to the access mode it requires.
///
/// Requests that target an ACL document need `Control` whatever the
/// method. Otherwise `GET` reads, `PUT` and `DELETE` write, and `POST` and
/// `PATCH` append when `is_append_only` holds and write when it does not.
pub const fn classify(method: RequestMethod, is_control: bool, is_append_only: bool) -> AccessMode {
    if is_control {
        return AccessMode::Control;
    }
    match method {
        RequestMethod::Get => AccessMode::Read,
        RequestMethod::Put | RequestMethod::Delete => AccessMode::Write,
        RequestMethod::Post | RequestMethod::Patch => {
            if is_append_only {
                AccessMode::Append
            } else {
                AccessMode::Write
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wac_core::SuffixAclMapping;

    const ALL: [RequestMethod; 5] = [
        RequestMethod::Get,
        RequestMethod::Post,
        RequestMethod::Put,
        RequestMethod::Patch,
        RequestMethod::Delete,
    ];

    #[test]
    fn test_control_overrides_method() {
        for method in ALL {
            assert_eq!(classify(method, true, true), AccessMode::Control);
            assert_eq!(classify(method, true, false), AccessMode::Control);
        }
    }

    #[test]
    fn test_plain_methods() {
        assert_eq!(classify(RequestMethod::Get, false, true), AccessMode::Read);
        assert_eq!(classify(RequestMethod::Put, false, false), AccessMode::Write);
        assert_eq!(classify(RequestMethod::Delete, false, false), AccessMode::Write);
    }

    #[test]
    fn test_append_only_methods() {
        assert_eq!(classify(RequestMethod::Post, false, true), AccessMode::Append);
        assert_eq!(classify(RequestMethod::Patch, false, true), AccessMode::Append);
        assert_eq!(classify(RequestMethod::Patch, false, false), AccessMode::Write);
        assert_eq!(classify(RequestMethod::Post, false, false), AccessMode::Write);
    }

    #[test]
    fn test_is_control_request() {
        let mapping = SuffixAclMapping::default();
        assert!(is_control_request(
            &mapping,
            &ResourceId::new("http://localhost:8080/test.acl")
        ));
        assert!(!is_control_request(
            &mapping,
            &ResourceId::new("http://localhost:8080/test")
        ));
        assert!(is_control_request(
            &mapping,
            &ResourceId::new("http://localhost:8080/dir/.acl")
        ));
    }
}
