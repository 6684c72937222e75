macro_rules! quantity {
    ($(#[$attribute:meta])* $name:ident) => {
        $(#[$attribute])*
        #[repr(transparent)]
        #[derive(
            ::derive_more::Add,
            ::derive_more::AddAssign,
            ::derive_more::From,
            ::derive_more::FromStr,
            ::derive_more::Neg,
            ::derive_more::Sub,
            ::derive_more::SubAssign,
            ::derive_more::Sum,
            ::serde::Deserialize,
            ::serde::Serialize,
            ::std::clone::Clone,
            ::std::marker::Copy,
            ::std::default::Default,
            ::std::cmp::PartialEq,
            ::std::cmp::Eq,
            ::std::cmp::PartialOrd,
            ::std::cmp::Ord,
            ::std::hash::Hash,
        )]
        pub struct $name(pub ::rust_decimal::Decimal);

        impl $name {
            pub const ZERO: Self = Self(::rust_decimal::Decimal::ZERO);

            /// Round to two decimal places, midpoints away from zero.
            #[must_use]
            pub fn round_to_hundredths(self) -> Self {
                Self(self.0.round_dp_with_strategy(
                    2,
                    ::rust_decimal::RoundingStrategy::MidpointAwayFromZero,
                ))
            }
        }

        impl ::std::ops::Mul<::rust_decimal::Decimal> for $name {
            type Output = Self;

            fn mul(self, rhs: ::rust_decimal::Decimal) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl ::std::ops::Div<::rust_decimal::Decimal> for $name {
            type Output = Self;

            fn div(self, rhs: ::rust_decimal::Decimal) -> Self::Output {
                Self(self.0 / rhs)
            }
        }
    };
}
