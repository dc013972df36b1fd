use grpc_client::{
    ChannelConfig, DEFAULT_COMPRESSION, DEFAULT_MAX_MESSAGE_SIZE, GrpcResult,
    create_channel_lazy_with_config,
};
use readiness::{ReadinessConfig, ReadinessError, wait_until_ready};
use rpc::users::v1::GetUsersRequest;
use rpc::users::v1::users_service_client::UsersServiceClient;
use tonic::transport::Channel;

pub type UsersGrpcClient = UsersServiceClient<Channel>;

/// Build a users client over a lazy channel
///
/// Nothing is dialed here; use [`wait_for_server`] before the first real call.
pub fn connect(addr: &str, config: ChannelConfig) -> GrpcResult<UsersGrpcClient> {
    let channel = create_channel_lazy_with_config(addr, config)?;

    Ok(UsersServiceClient::new(channel)
        .accept_compressed(DEFAULT_COMPRESSION)
        .send_compressed(DEFAULT_COMPRESSION)
        .max_decoding_message_size(DEFAULT_MAX_MESSAGE_SIZE)
        .max_encoding_message_size(DEFAULT_MAX_MESSAGE_SIZE))
}

/// Block until the server answers an unfiltered `GetUsers`
pub async fn wait_for_server(
    client: &UsersGrpcClient,
    readiness: &ReadinessConfig,
) -> Result<(), ReadinessError> {
    wait_until_ready("users-service", readiness, || {
        let mut client = client.clone();
        async move {
            client
                .get_users(GetUsersRequest::default())
                .await
                .map(|_| ())
        }
    })
    .await
}
