use bigint::{Limb, UInt};

/// Non-negative integer weight of a point in a multi-scalar multiplication.
///
/// The heap itself only needs [`Ord`]. The rest is what the Bos–Coster
/// reduction does with a weight between heap calls.
pub trait Weight: Ord + Clone {
    fn zero() -> Self
    where
        Self: Sized;
    fn is_zero(&self) -> bool;
    /// Number of significant bits, zero for zero.
    fn bits(&self) -> usize;
    /// Bit `index`, counting from the least significant one.
    fn bit(&self, index: usize) -> bool;
    /// `self -= rhs`, where `rhs` must not exceed `self`.
    fn sub_assign_smaller(&mut self, rhs: &Self);
    fn add_assign_weight(&mut self, rhs: &Self);
}

macro_rules! impl_weight_for_primitive {
    ($($t: ty),*) => {
        $(
            impl Weight for $t {
                fn zero() -> Self {
                    0
                }

                fn is_zero(&self) -> bool {
                    *self == 0
                }

                fn bits(&self) -> usize {
                    (<$t>::BITS - self.leading_zeros()) as usize
                }

                fn bit(&self, index: usize) -> bool {
                    index < <$t>::BITS as usize && (self >> index) & 1 == 1
                }

                fn sub_assign_smaller(&mut self, rhs: &Self) {
                    debug_assert!(*self >= *rhs);
                    *self -= rhs;
                }

                fn add_assign_weight(&mut self, rhs: &Self) {
                    debug_assert!(self.checked_add(*rhs).is_some(), "weight overflow");
                    *self = self.wrapping_add(*rhs);
                }
            }
        )*
    };
}

impl_weight_for_primitive!(u8, u16, u32, u64, u128, usize);

impl<const LIMBS: usize> Weight for UInt<LIMBS> {
    fn zero() -> Self {
        Self::ZERO
    }

    fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    fn bits(&self) -> usize {
        self.bits_vartime()
    }

    fn bit(&self, index: usize) -> bool {
        let words = self.as_words();
        let (word, shift) = (index / Limb::BIT_SIZE, index % Limb::BIT_SIZE);
        word < LIMBS && (words[word] >> shift) & 1 == 1
    }

    fn sub_assign_smaller(&mut self, rhs: &Self) {
        let (difference, borrow) = self.sbb(rhs, Limb::ZERO);
        debug_assert_eq!(borrow, Limb::ZERO);
        *self = difference;
    }

    fn add_assign_weight(&mut self, rhs: &Self) {
        let (sum, carry) = self.adc(rhs, Limb::ZERO);
        debug_assert_eq!(carry, Limb::ZERO, "weight overflow");
        *self = sum;
    }
}

#[cfg(feature = "biguint")]
impl Weight for num_bigint::BigUint {
    fn zero() -> Self {
        Self::default()
    }

    fn is_zero(&self) -> bool {
        self.bits() == 0
    }

    fn bits(&self) -> usize {
        num_bigint::BigUint::bits(self) as usize
    }

    fn bit(&self, index: usize) -> bool {
        num_bigint::BigUint::bit(self, index as u64)
    }

    fn sub_assign_smaller(&mut self, rhs: &Self) {
        debug_assert!(*self >= *rhs);
        *self -= rhs;
    }

    fn add_assign_weight(&mut self, rhs: &Self) {
        *self += rhs;
    }
}
