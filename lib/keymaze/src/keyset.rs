use std::fmt;

/// Key letters as bits `a..=z`. A door shares the bit of the key that opens it.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeySet(u32);

impl KeySet {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn insert_door(&mut self, door: u8) {
        debug_assert!(door.is_ascii_uppercase());
        self.0 |= 1 << (door - b'A');
    }

    pub fn insert_key(&mut self, key: u8) {
        debug_assert!(key.is_ascii_lowercase());
        self.0 |= 1 << (key - b'a');
    }

    pub fn contains_key(&self, key: u8) -> bool {
        self.0 & (1 << (key - b'a')) != 0
    }

    // This keyset can open all doors in the set
    pub fn can_open(&self, doors: &Self) -> bool {
        ((!self.0) & doors.0) == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn from_keys<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut keys = Self::new();
        for key in iter {
            keys.insert_key(key);
        }
        keys
    }

    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        (0..26u8)
            .filter(|&i| (self.0 & (1 << i)) != 0)
            .map(|i| (i + b'a') as char)
    }
}

impl fmt::Debug for KeySet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;
        for (i, ch) in self.letters().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", ch)?;
        }
        write!(f, "]")
    }
}
