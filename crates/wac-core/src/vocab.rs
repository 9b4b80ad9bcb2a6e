//! RDF vocabulary used by ACL documents, group documents and N3 patches.

/// RDF core vocabulary.
pub mod rdf {
    /// `rdf:type`, written `a` in Turtle.
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    /// `rdf:first` (collections).
    pub const FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";
    /// `rdf:rest` (collections).
    pub const REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";
    /// `rdf:nil` (empty collection).
    pub const NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";
    /// `rdf:langString`.
    pub const LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";
}

/// XML Schema datatypes assigned to Turtle shorthand literals.
pub mod xsd {
    /// `xsd:string`.
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    /// `xsd:integer`.
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
    /// `xsd:decimal`.
    pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
    /// `xsd:double`.
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
    /// `xsd:boolean`.
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
}

/// Web Access Control vocabulary.
pub mod acl {
    /// Namespace IRI.
    pub const NS: &str = "http://www.w3.org/ns/auth/acl#";
    /// `acl:Authorization`.
    pub const AUTHORIZATION: &str = "http://www.w3.org/ns/auth/acl#Authorization";
    /// `acl:accessTo`, the direct target relation.
    pub const ACCESS_TO: &str = "http://www.w3.org/ns/auth/acl#accessTo";
    /// `acl:default`, the inherited target relation.
    pub const DEFAULT: &str = "http://www.w3.org/ns/auth/acl#default";
    /// `acl:mode`.
    pub const MODE: &str = "http://www.w3.org/ns/auth/acl#mode";
    /// `acl:agent`.
    pub const AGENT: &str = "http://www.w3.org/ns/auth/acl#agent";
    /// `acl:agentClass`.
    pub const AGENT_CLASS: &str = "http://www.w3.org/ns/auth/acl#agentClass";
    /// `acl:agentGroup`.
    pub const AGENT_GROUP: &str = "http://www.w3.org/ns/auth/acl#agentGroup";
    /// `acl:AuthenticatedAgent`.
    pub const AUTHENTICATED_AGENT: &str = "http://www.w3.org/ns/auth/acl#AuthenticatedAgent";
    /// `acl:Read`.
    pub const READ: &str = "http://www.w3.org/ns/auth/acl#Read";
    /// `acl:Append`.
    pub const APPEND: &str = "http://www.w3.org/ns/auth/acl#Append";
    /// `acl:Write`.
    pub const WRITE: &str = "http://www.w3.org/ns/auth/acl#Write";
    /// `acl:Control`.
    pub const CONTROL: &str = "http://www.w3.org/ns/auth/acl#Control";
}

/// FOAF vocabulary.
pub mod foaf {
    /// `foaf:Agent`, the class of every agent (public access).
    pub const AGENT: &str = "http://xmlns.com/foaf/0.1/Agent";
}

/// vCard vocabulary, used for group membership.
pub mod vcard {
    /// `vcard:hasMember`.
    pub const HAS_MEMBER: &str = "http://www.w3.org/2006/vcard/ns#hasMember";
}

/// Solid terms used by N3 patch documents.
pub mod solid {
    /// Namespace IRI.
    pub const NS: &str = "http://www.w3.org/ns/solid/terms#";
    /// `solid:inserts`.
    pub const INSERTS: &str = "http://www.w3.org/ns/solid/terms#inserts";
    /// `solid:deletes`.
    pub const DELETES: &str = "http://www.w3.org/ns/solid/terms#deletes";
    /// `solid:where`.
    pub const WHERE: &str = "http://www.w3.org/ns/solid/terms#where";
}
