use serde::{Deserialize, Serialize};

/// A code travelling on the belt: a raw component, a finished product, or
/// the empty marker. Opaque to the engine; cheap to copy and compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Code(pub u32);

impl Code {
    /// The "nothing here" code. Every slot always holds some code; this is
    /// the one that means the slot is vacant.
    pub const EMPTY: Code = Code(0);

    /// The finished-product code dropped by workers.
    pub const PRODUCT: Code = Code(1);

    /// Default first required component.
    pub const COMPONENT_A: Code = Code(2);

    /// Default second required component.
    pub const COMPONENT_B: Code = Code(3);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_equality() {
        let a = Code(7);
        let b = Code(7);
        let c = Code(8);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn code_copy() {
        let a = Code::COMPONENT_A;
        let b = a; // Copy
        assert_eq!(a, b);
    }

    #[test]
    fn default_alphabet_is_disjoint() {
        let all = [
            Code::EMPTY,
            Code::PRODUCT,
            Code::COMPONENT_A,
            Code::COMPONENT_B,
        ];
        for (i, x) in all.iter().enumerate() {
            for y in &all[i + 1..] {
                assert_ne!(x, y);
            }
        }
    }

    #[test]
    fn codes_are_hashable() {
        use std::collections::HashMap;
        let mut map = HashMap::new();
        map.insert(Code::COMPONENT_A, "component a");
        map.insert(Code::PRODUCT, "product");
        assert_eq!(map[&Code::COMPONENT_A], "component a");
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn code_ordering() {
        assert!(Code(1) < Code(2));
    }
}
