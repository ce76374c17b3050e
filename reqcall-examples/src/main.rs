use reqcall_core::{BoxError, ClientConfig, HttpClient, HttpRequest, HttpResponse, RequestSpec};
use serde::Deserialize;
use std::process;

/// A simple Mock Client for demonstration.
/// It doesn't actually make HTTP requests, but answers based on the path.
pub struct ExampleMockClient;

impl HttpClient for ExampleMockClient {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, BoxError> {
        println!(
            ">>> [MOCK] Intercepted a {} request to '{}'",
            request.method(),
            request.uri()
        );
        for (k, v) in request.headers() {
            println!(">>> [MOCK]   {}: {}", k, v.to_str().unwrap_or("(binary)"));
        }

        if request.uri().path() == "/missing" {
            return Ok(HttpResponse::from_bytes(
                404,
                r#"{"code": "not_found", "detail": "no such item"}"#,
            ));
        }

        Ok(
            HttpResponse::from_bytes(200, r#"{"message": "Hello from ExampleMockClient!"}"#)
                .with_header("Content-Type", "application/json"),
        )
    }
}

#[derive(Debug, Default, Deserialize)]
struct Greeting {
    message: String,
}

#[derive(Debug, Default, Deserialize)]
struct ApiError {
    code: String,
    detail: String,
}

fn main() {
    // We inject our custom mock client instead of reqwest
    let requester = match ClientConfig::new().with_client(ExampleMockClient).build() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Client error: {}", e);
            process::exit(1);
        }
    };

    println!("Calling a path that answers 200...\n");
    let mut greeting = Greeting::default();
    let spec = RequestSpec::new("GET", "http://localhost:8080/hello")
        .query("lang", "en")
        .header("Accept", "application/json");
    match requester.execute(spec, 200, Some(&mut greeting), None) {
        Ok(message) => println!("ok: {}\ndecoded: {:?}\n", message, greeting),
        Err(e) => eprintln!("unexpected error: {}\n", e),
    }

    println!("Calling a path that answers 404...\n");
    let mut api_error = ApiError::default();
    let spec = RequestSpec::new("GET", "http://localhost:8080/missing");
    match requester.execute(spec, 200, None, Some(&mut api_error)) {
        Ok(message) => println!("unexpected success: {}", message),
        Err(e) => println!(
            "error: {}\ndecoded: code={} detail={}",
            e, api_error.code, api_error.detail
        ),
    }
}
