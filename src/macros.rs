/// Defines a plain value struct with public fields and a `with_<field>()` builder
/// method per field.
///
/// Attributes placed before the struct name and before each field are forwarded.
/// The calling module must have `paste::paste` in scope.
#[macro_export]
macro_rules! create_struct_with {
    ($(#[$attr:meta])* $struct_name:ident, {$($(#[$field_attr:meta])* $varname:ident : $vartype:ty),* $(,)?}) => {
        $(#[$attr])*
        pub struct $struct_name {
            $($(#[$field_attr])* pub $varname: $vartype),*
        }

        paste! {
            impl $struct_name {
                $(
                    pub fn [<with_ $varname>](self, [<new_ $varname>]: $vartype) -> Self {
                        $struct_name {$varname: [<new_ $varname>], ..self}
                    }
                )*
            }
        }
    };
}
