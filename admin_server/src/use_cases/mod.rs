// Use cases layer: admin workflows for the term catalog, host gate, and uploads.

pub mod host_login;
pub mod host_logout;
pub mod terms;
pub mod upload;
pub mod verify_host;

#[cfg(test)]
pub(crate) mod test_support;
