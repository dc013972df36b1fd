//! Users gRPC service implementation
//!
//! Thin adapter between the generated `UsersService` trait and the domain
//! `UserService`. Every domain error already belongs to the closed taxonomy,
//! so conversion to `Status` is a plain `From`.

use std::sync::Arc;

use domain_users::{User, UserRepository, UserService};
use rpc::users::v1::{
    CreateUserRequest, CreateUserResponse, DeleteUserRequest, DeleteUserResponse,
    GetUsersRequest, GetUsersResponse, users_service_server::UsersService,
};
use tonic::{Request, Response, Status};

fn to_proto(user: User) -> rpc::users::v1::User {
    rpc::users::v1::User {
        id: user.id,
        name: user.name,
        email: user.email,
    }
}

/// gRPC service implementation for users
///
/// Generic over the repository type for testability.
pub struct UsersServiceImpl<R>
where
    R: UserRepository + 'static,
{
    service: Arc<UserService<R>>,
}

impl<R> UsersServiceImpl<R>
where
    R: UserRepository + 'static,
{
    pub fn new(service: UserService<R>) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

#[tonic::async_trait]
impl<R> UsersService for UsersServiceImpl<R>
where
    R: UserRepository + 'static,
{
    async fn create_user(
        &self,
        request: Request<CreateUserRequest>,
    ) -> Result<Response<CreateUserResponse>, Status> {
        let req = request.into_inner();
        let user = self.service.create_user(&req.name, &req.email).await?;

        Ok(Response::new(CreateUserResponse {
            user: Some(to_proto(user)),
        }))
    }

    async fn get_users(
        &self,
        request: Request<GetUsersRequest>,
    ) -> Result<Response<GetUsersResponse>, Status> {
        let req = request.into_inner();
        let users = self.service.list_users(req.name_filter.as_deref()).await?;

        Ok(Response::new(GetUsersResponse {
            users: users.into_iter().map(to_proto).collect(),
        }))
    }

    async fn delete_user(
        &self,
        request: Request<DeleteUserRequest>,
    ) -> Result<Response<DeleteUserResponse>, Status> {
        let deleted = self.service.delete_user(request.into_inner().id).await?;

        Ok(Response::new(DeleteUserResponse {
            success: true,
            message: deleted.message,
        }))
    }
}
