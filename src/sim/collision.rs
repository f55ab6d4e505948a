//! Collision categories and filters
//!
//! Every body carries a `(category, mask, group)` triple. The engine lets two
//! bodies touch only when each one's mask contains the other's category; this
//! module only decides which bits each kind of body gets.

/// Collision category bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Category {
    /// Static obstacle geometry
    Wall = 0b001,
    /// Dynamic falling particle
    Sand = 0b010,
    /// Threshold sensor line (position reference only)
    BorderLine = 0b100,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Wall, Category::Sand, Category::BorderLine];

    #[inline]
    pub const fn bits(self) -> u32 {
        self as u32
    }
}

/// OR together a set of categories into a mask
pub const fn mask_of(categories: &[Category]) -> u32 {
    let mut mask = 0;
    let mut i = 0;
    while i < categories.len() {
        mask |= categories[i].bits();
        i += 1;
    }
    mask
}

/// What a body is for, as far as collisions go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Static funnel/chamber geometry
    Wall,
    /// Countable falling particle
    Sand,
    /// Threshold sensor
    BorderLine,
    /// Fixed sprite with no physical presence
    Decoration,
    /// Bouncy scenery particle living in the side chamber
    Obstacle,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Wall,
        Role::Sand,
        Role::BorderLine,
        Role::Decoration,
        Role::Obstacle,
    ];
}

/// Category/mask/group triple assigned to a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CollisionFilter {
    /// Category bits this body belongs to
    pub category: u32,
    /// Categories this body may collide with
    pub mask: u32,
    /// Same non-zero group: positive always collides, negative never does
    pub group: i32,
}

impl CollisionFilter {
    /// Filter that collides with nothing
    pub const NONE: Self = Self {
        category: 0,
        mask: 0,
        group: 0,
    };

    #[inline]
    pub const fn new(category: u32, mask: u32) -> Self {
        Self {
            category,
            mask,
            group: 0,
        }
    }

    /// Filter table for each role
    pub const fn for_role(role: Role) -> Self {
        match role {
            // Walls are static, so they only need to stop sand
            Role::Wall => Self::new(Category::Wall.bits(), mask_of(&[Category::Sand])),
            Role::Sand => Self::new(
                Category::Sand.bits(),
                mask_of(&[Category::Wall, Category::Sand]),
            ),
            Role::BorderLine => Self::new(Category::BorderLine.bits(), 0),
            Role::Decoration => Self::NONE,
            // Obstacles bounce off walls but pass through the sand batch
            Role::Obstacle => Self::new(Category::Sand.bits(), mask_of(&[Category::Wall])),
        }
    }

    /// Whether this filter's mask accepts the given category
    #[inline]
    pub const fn accepts(&self, category: Category) -> bool {
        self.mask & category.bits() != 0
    }

    /// Whether this filter belongs to the given category
    #[inline]
    pub const fn is(&self, category: Category) -> bool {
        self.category & category.bits() != 0
    }

    /// Symmetric pair test the physics engine applies
    pub fn can_collide(a: &Self, b: &Self) -> bool {
        if a.group == b.group && a.group != 0 {
            return a.group > 0;
        }
        (a.mask & b.category) != 0 && (b.mask & a.category) != 0
    }
}
