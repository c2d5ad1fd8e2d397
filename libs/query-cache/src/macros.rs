/// Declares a unit struct implementing [`CacheKey`](crate::key::CacheKey).
///
/// ```ignore
/// cache_key!(KeywordCacheKey => "keyword": "{}"[keyword: str]);
/// ```
#[macro_export]
macro_rules! cache_key {
    ($name:ident => $namespace:literal : $format_key:literal[$($arg:ident:$ty:ident),*]) => {
        #[doc=concat!(concat!("Cache key binding\n ## Namespace \n", $namespace), concat!("\n ## Fingerprint \n ", $format_key))]
        pub struct $name;

        impl $crate::key::CacheKey for $name {
            type Args<'r> = ($(&'r $ty,)*);

            const NAMESPACE: &'static str = $namespace;

            fn fingerprint(&self, args: Self::Args<'_>) -> std::borrow::Cow<'static, str> {
                let ($($arg,)*) = args;

                (format!($format_key, $($arg),*)).into()
            }
        }
    };
}
