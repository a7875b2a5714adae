/// Expands operator templates for a specific ISA.
///
/// This macro is "Layer 3" of the architecture. It takes a module name, an
/// ISA identifier and an optional `target_feature` string, and generates a
/// module containing every dot-product kernel for that ISA.
#[macro_export]
macro_rules! expand_isa_impls {
    ($module_name:ident, $isa:ident $(, $feature:literal)?) => {
        pub mod $module_name {
            crate::define_dot_ops!($isa $(, $feature)?);
        }
    };
}
