use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::Method,
    web, Error,
};
use futures_util::future::{ok, LocalBoxFuture, Ready};
use std::{rc::Rc, task::{Context, Poll}};

use crate::{errors::AppError, AppState};

/// Rejects requests to the wrapped scope unless they carry the admin token.
pub struct AdminGuardMiddleware;

impl<S> Transform<S, ServiceRequest> for AdminGuardMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = AdminGuardService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AdminGuardService {
            service: Rc::new(service),
        })
    }
}

pub struct AdminGuardService<S> {
    service: Rc<S>,
}

impl<S> Service<ServiceRequest> for AdminGuardService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            if req.method() == Method::OPTIONS {
                return service.call(req).await;
            }

            let Some(state) = req.app_data::<web::Data<AppState>>() else {
                tracing::error!("AppState missing in admin guard");
                let response = AppError::InternalError("Internal server error".into()).to_http_response();
                return Ok(req.into_response(response));
            };

            if let Err(e) = state.admin_guard.authorize_request(req.request()) {
                tracing::warn!("Rejected admin request to {}", req.path());
                return Ok(req.into_response(e.to_http_response()));
            }

            service.call(req).await
        })
    }
}
