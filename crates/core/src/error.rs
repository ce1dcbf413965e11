use crate::types::AssetId;

/// Every way a registry operation can be rejected.
///
/// A rejection never leaves partial state behind: all checks run before the
/// first write.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Asset #{0} does not exist")]
    MissingEntry(AssetId),

    #[error("Caller is not the custodian of asset #{0}")]
    OwnershipMismatch(AssetId),

    #[error("Privilege violation: {0}")]
    PrivilegeViolation(String),

    #[error("Invalid descriptor: {0}")]
    DescriptorInvalid(String),

    #[error("Storage capacity {0} is outside the accepted range")]
    CapacityExceeded(u64),

    #[error("Classification rejected: {0}")]
    ClassificationRejected(String),

    #[error("Authorization required: {0}")]
    AuthorizationRequired(String),

    #[error("Asset #{0} is already registered")]
    DuplicateRegistration(AssetId),

    /// Reserved; no current operation produces it.
    #[error("Access denied: {0}")]
    AccessDenied(String),
}

impl RegistryError {
    /// Stable machine-readable code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            RegistryError::MissingEntry(_) => "MISSING_ENTRY",
            RegistryError::OwnershipMismatch(_) => "OWNERSHIP_MISMATCH",
            RegistryError::PrivilegeViolation(_) => "PRIVILEGE_VIOLATION",
            RegistryError::DescriptorInvalid(_) => "DESCRIPTOR_INVALID",
            RegistryError::CapacityExceeded(_) => "CAPACITY_EXCEEDED",
            RegistryError::ClassificationRejected(_) => "CLASSIFICATION_REJECTED",
            RegistryError::AuthorizationRequired(_) => "AUTHORIZATION_REQUIRED",
            RegistryError::DuplicateRegistration(_) => "DUPLICATE_REGISTRATION",
            RegistryError::AccessDenied(_) => "ACCESS_DENIED",
        }
    }
}

pub type RegistryResult<T> = Result<T, RegistryError>;
