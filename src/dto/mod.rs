pub mod rpc;

pub use rpc::{
    ApiError, ApiErrorDetail, AuthenticateRequest, AuthenticateResponse, JsonRpcRequest,
    JsonRpcResponse, REQUEST_ID,
};
