/// Generate a router async method that walks capable providers in
/// registration order and calls a single-provider method on each until one
/// succeeds.
///
/// Notes on `not_found` label:
/// - Pass a noun only (e.g., "financials", "quote statistics").
/// - The orchestrator formats the final error as "{label} for {SUBJECT}".
///
/// Every argument must be a reference or `Copy`; the generated futures borrow
/// them for the duration of the call.
#[macro_export]
macro_rules! tidyq_router_method {
    (
        $(#[$meta:meta])*
        method: $name:ident( $subject:ident : $subject_ty:ty $(, $arg_ident:ident : $arg_ty:ty )* ) -> $ret:ty,
        subject: $subject_expr:expr,
        provider: $provider:ident,
        accessor: $accessor:ident,
        capability: $capability:expr,
        not_found: $not_found:expr,
        call: $call_name:ident( $( $call_arg:ident ),* )
    ) => {
        $(#[$meta])*
        #[cfg_attr(
            feature = "tracing",
            tracing::instrument(
                target = "tidyq::router",
                skip(self, $subject $(, $arg_ident)*),
                fields(subject = %$subject_expr),
            )
        )]
        ///
        /// # Errors
        /// Returns an error if no eligible provider succeeds or none support the capability.
        pub(crate) async fn $name(
            &self,
            $subject: $subject_ty,
            $( $arg_ident: $arg_ty ),*
        ) -> Result<$ret, tidyq_core::TidyqError> {
            let label: &str = $subject_expr;
            self.fetch_single(label, $capability, $not_found, move |c| {
                c.$accessor()?;
                Some(async move {
                    match c.$accessor() {
                        Some(p) => p.$call_name( $( $call_arg ),* ).await,
                        None => Err(tidyq_core::TidyqError::upstream(
                            c.name(),
                            concat!("missing ", stringify!($provider), " during call"),
                        )),
                    }
                })
            })
            .await
        }
    };
}
