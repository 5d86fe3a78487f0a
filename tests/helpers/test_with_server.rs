#[macro_export]
macro_rules! test_with_server {
    ($name:ident, |$server:ident, $ctx_state:ident, $config:ident| $body:block) => {
        #[tokio::test]
        #[allow(unused_variables)]
        async fn $name() {
            let app = $crate::helpers::create_test_app(Some(&Default::default()));
            let $server = &app.server;
            let $ctx_state = app.ctx_state.clone();
            let $config = app.config.clone();
            $body
        }
    };
}
