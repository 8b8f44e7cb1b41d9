use std::fmt;

use crate::{metadata::customattributes::CustomAttributeNamedArgument, Error};

/// Security actions as defined in ECMA-335 and .NET Framework
///
/// These values control how permissions are applied to code elements (methods, types, assemblies).
/// Each action has different semantics for how the CLR enforces permissions.
///
/// # Reference
/// * ECMA-335 II.20 + II.22.11
/// * <https://learn.microsoft.com/en-us/dotnet/api/system.security.permissions.securityaction>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecurityAction {
    /// Without further checks, refuse Demand for the specified permission.
    Deny,
    /// Check that all callers in the call chain have been granted specified permission.
    Demand,
    /// Without further checks, satisfy Demand for the specified permission.
    Assert,
    /// Check that the current assembly has been granted the specified permission.
    NonCasDemand,
    /// Check that the immediate caller has been granted the specified permission.
    LinkDemand,
    /// The specified permission shall be granted in order to inherit from class or override virtual method.
    InheritanceDemand,
    /// Specify the minimum permissions required to run.
    RequestMinimum,
    /// Specify the optional permissions to grant.
    RequestOptional,
    /// Specify the permissions not to be granted.
    RequestRefuse,
    /// Reserved for implementation-specific use.
    PrejitGrant,
    /// Reserved for implementation-specific use.
    PrejitDeny,
    /// Non-CAS version of `LinkDemand`.
    NonCasLinkDemand,
    /// Non-CAS version of `InheritanceDemand`.
    NonCasInheritance,
    /// Link demand for one of several permissions.
    LinkDemandChoice,
    /// Inheritance demand for one of several permissions.
    InheritanceDemandChoice,
    /// Demand for one of several permissions.
    DemandChoice,
    /// Without further checks, refuse Demand for all permissions other than those specified.
    PermitOnly,
}

impl SecurityAction {
    /// The value stored in `DeclSecurity.Action`
    #[must_use]
    pub fn value(self) -> u16 {
        match self {
            SecurityAction::Deny => 0x0001,
            SecurityAction::Demand => 0x0002,
            SecurityAction::Assert => 0x0003,
            SecurityAction::NonCasDemand => 0x0004,
            SecurityAction::LinkDemand => 0x0005,
            SecurityAction::InheritanceDemand => 0x0006,
            SecurityAction::RequestMinimum => 0x0007,
            SecurityAction::RequestOptional => 0x0008,
            SecurityAction::RequestRefuse => 0x0009,
            SecurityAction::PrejitGrant => 0x000A,
            SecurityAction::PrejitDeny => 0x000B,
            SecurityAction::NonCasLinkDemand => 0x000C,
            SecurityAction::NonCasInheritance => 0x000D,
            SecurityAction::LinkDemandChoice => 0x000E,
            SecurityAction::InheritanceDemandChoice => 0x000F,
            SecurityAction::DemandChoice => 0x0010,
            SecurityAction::PermitOnly => 0x0011,
        }
    }
}

impl TryFrom<u16> for SecurityAction {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Ok(match value {
            0x0001 => SecurityAction::Deny,
            0x0002 => SecurityAction::Demand,
            0x0003 => SecurityAction::Assert,
            0x0004 => SecurityAction::NonCasDemand,
            0x0005 => SecurityAction::LinkDemand,
            0x0006 => SecurityAction::InheritanceDemand,
            0x0007 => SecurityAction::RequestMinimum,
            0x0008 => SecurityAction::RequestOptional,
            0x0009 => SecurityAction::RequestRefuse,
            0x000A => SecurityAction::PrejitGrant,
            0x000B => SecurityAction::PrejitDeny,
            0x000C => SecurityAction::NonCasLinkDemand,
            0x000D => SecurityAction::NonCasInheritance,
            0x000E => SecurityAction::LinkDemandChoice,
            0x000F => SecurityAction::InheritanceDemandChoice,
            0x0010 => SecurityAction::DemandChoice,
            0x0011 => SecurityAction::PermitOnly,
            _ => return Err(malformed_error!("Unknown security action 0x{:04X}", value)),
        })
    }
}

impl fmt::Display for SecurityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// One permission of a declaration: a security attribute type and its property values
#[derive(Debug, Clone, PartialEq)]
pub struct SecurityAttribute {
    /// Assembly qualified name of the attribute type
    pub attribute_type: String,
    /// Named arguments applied to the attribute
    pub named_arguments: Vec<CustomAttributeNamedArgument>,
}

impl SecurityAttribute {
    /// An attribute without arguments
    pub fn new(attribute_type: impl Into<String>) -> Self {
        SecurityAttribute {
            attribute_type: attribute_type.into(),
            named_arguments: Vec::new(),
        }
    }
}

/// A permission set applied to a type, method or assembly with one action
#[derive(Debug, Clone, PartialEq)]
pub struct SecurityDeclaration {
    /// How the permissions are enforced
    pub action: SecurityAction,
    /// The permissions
    pub attributes: Vec<SecurityAttribute>,
}

impl SecurityDeclaration {
    /// An empty declaration
    #[must_use]
    pub fn new(action: SecurityAction) -> Self {
        SecurityDeclaration {
            action,
            attributes: Vec::new(),
        }
    }
}
