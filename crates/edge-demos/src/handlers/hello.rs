//! Hello worker: the smallest possible worker

use edge_demos_sdk::prelude::*;

pub async fn handle(_env: &Env, req: Request) -> Result<Response, HandlerError> {
    if req.path == "/hello" {
        Ok(Response::text(200, "Hello!\n"))
    } else {
        Ok(Response::not_found())
    }
}

edge_demos_sdk::entry_point!(entry => handle);
