use aws_smithy_http::body::SdkBody;
use aws_types::{region::Region, Credentials, SdkConfig};

/// Configuration for mocking AWS SDK clients
pub async fn get_mock_config() -> SdkConfig {
    aws_config::from_env()
        .region(Region::new("us-west-1"))
        .credentials_provider(Credentials::new(
            "accesskey",
            "privatekey",
            None,
            None,
            "dummy",
        ))
        .load()
        .await
}

/// Base request builder for the AWS SDK calls
pub fn get_request_builder(service: &str) -> http::request::Builder {
    get_request_builder_with_path(service, "")
}

/// Request builder for REST services that encode the operation in the path
pub fn get_request_builder_with_path(service: &str, path: &str) -> http::request::Builder {
    http::Request::builder().uri(format!("https://{service}.us-west-1.amazonaws.com/{path}"))
}

/// Request builder for an ECS JSON operation
pub fn ecs_request(operation: &str) -> http::request::Builder {
    get_request_builder("ecs")
        .header("content-type", "application/x-amz-json-1.1")
        .header(
            "x-amz-target",
            format!("AmazonEC2ContainerServiceV20141113.{operation}"),
        )
}

/// Request builder for a CloudWatch Events JSON operation
pub fn events_request(operation: &str) -> http::request::Builder {
    get_request_builder("events")
        .header("content-type", "application/x-amz-json-1.1")
        .header("x-amz-target", format!("AWSEvents.{operation}"))
}

/// JSON response with the given status code
pub fn json_response(status: u16, body: &str) -> http::Response<SdkBody> {
    http::Response::builder()
        .status(status)
        .body(SdkBody::from(body.to_string()))
        .unwrap()
}

/// `ResourceNotFoundException` as returned by JSON protocol services
pub fn json_not_found() -> http::Response<SdkBody> {
    json_response(
        400,
        r#"{"__type":"ResourceNotFoundException","message":"Resource does not exist."}"#,
    )
}

/// `ResourceNotFoundException` as returned by the Lambda REST API
pub fn rest_not_found() -> http::Response<SdkBody> {
    http::Response::builder()
        .status(404)
        .header("x-amzn-errortype", "ResourceNotFoundException")
        .body(SdkBody::from(
            r#"{"Type":"User","Message":"The resource you requested does not exist."}"#,
        ))
        .unwrap()
}
