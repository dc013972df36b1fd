//! Protobuf contract for the users service.
//!
//! The sources under `src/generated/` are produced by `buf generate` from
//! `proto/users/v1/users.proto` and checked in, so building the workspace does
//! not need `protoc`. Regenerate them after editing the proto file.

pub mod users {
    pub mod v1 {
        include!("generated/users.v1.rs");
        include!("generated/users.v1.tonic.rs");
    }
}
