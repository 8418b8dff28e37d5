
mod availability_test;
mod cascade_test;
mod concurrency_test;
mod dashboard_test;
mod pagination_test;
mod payment_test;
mod router_test;
mod scoping_test;
mod service_test;
mod session_test;
