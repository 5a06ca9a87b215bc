//! Static inference tables: archetype triggers, canonical direction roles,
//! and type-compatibility priors.

use once_cell::sync::Lazy;
use regex::Regex;

use mneme_core::{EntityType, RelationshipType};

// ============================================================================
// Archetypes (Strategy A: textual co-occurrence)
// ============================================================================

/// One relationship archetype recognized from trigger phrases in text.
///
/// The archetype fires for an entity pair when both names appear inside the
/// sentence enclosing a trigger match. `strength` is the fallback; config
/// can override it per archetype.
pub struct Archetype {
    pub relationship_type: RelationshipType,
    pub trigger: Regex,
    pub strength: f32,
}

fn archetype(relationship_type: RelationshipType, trigger: &str, strength: f32) -> Archetype {
    Archetype {
        relationship_type,
        trigger: Regex::new(trigger).unwrap(),
        strength,
    }
}

static ARCHETYPES: Lazy<Vec<Archetype>> = Lazy::new(|| {
    use RelationshipType as R;
    vec![
        archetype(
            R::CreatedBy,
            r"(?i)\b(?:created|built|wrote|authored|developed|designed|implemented)(?:\s+by)?\b",
            0.8,
        ),
        archetype(
            R::BelongsTo,
            r"(?i)\b(?:belongs to|part of|member of|owned by|lives in)\b",
            0.9,
        ),
        archetype(
            R::DependsOn,
            r"(?i)\b(?:depends on|requires|needs|relies on|built on|based on)\b",
            0.7,
        ),
        archetype(
            R::Implements,
            r"(?i)\b(?:implements|implementation of|conforms to|satisfies)\b",
            0.7,
        ),
        archetype(
            R::Contains,
            r"(?i)\b(?:contains|includes|holds|consists of|made up of)\b",
            0.7,
        ),
        archetype(
            R::WorksOn,
            r"(?i)\b(?:works on|working on|assigned to|contributes to|contributing to|maintains)\b",
            0.6,
        ),
        archetype(
            R::Uses,
            r"(?i)\b(?:uses|using|used by|leverages|powered by|runs on|queries|cached in|caches in|stored in)\b",
            0.6,
        ),
        archetype(
            R::Calls,
            r"(?i)\b(?:calls|invokes|requests|hits|talks to|sends to)\b",
            0.6,
        ),
        archetype(
            R::Manages,
            r"(?i)\b(?:manages|managing|leads|leading|oversees|responsible for)\b",
            0.6,
        ),
        archetype(
            R::Extends,
            r"(?i)\b(?:extends|inherits from|builds upon|forked from|fork of)\b",
            0.6,
        ),
        archetype(
            R::CollaboratesWith,
            r"(?i)\b(?:collaborates with|paired with|pairing with|met with|together with|worked with)\b",
            0.5,
        ),
    ]
});

pub fn archetypes() -> &'static [Archetype] {
    &ARCHETYPES
}

// ============================================================================
// Canonical Direction Roles
// ============================================================================

/// Which entity types sit at each end of an archetype's edge, independent of
/// token order in the sentence.
pub struct DirectionRule {
    pub relationship_type: RelationshipType,
    pub from_roles: &'static [EntityType],
    pub to_roles: &'static [EntityType],
}

const ARTIFACTS: &[EntityType] = &[
    EntityType::Project,
    EntityType::Technology,
    EntityType::Api,
    EntityType::Service,
    EntityType::File,
    EntityType::Repository,
    EntityType::Document,
    EntityType::Database,
    EntityType::Site,
];

const ACTORS: &[EntityType] = &[EntityType::Person, EntityType::Organization];

static DIRECTION_RULES: &[DirectionRule] = &[
    DirectionRule {
        relationship_type: RelationshipType::CreatedBy,
        from_roles: ARTIFACTS,
        to_roles: ACTORS,
    },
    DirectionRule {
        relationship_type: RelationshipType::BelongsTo,
        from_roles: &[
            EntityType::File,
            EntityType::Person,
            EntityType::Api,
            EntityType::Service,
            EntityType::Document,
        ],
        to_roles: &[
            EntityType::Project,
            EntityType::Organization,
            EntityType::Repository,
            EntityType::Service,
        ],
    },
    DirectionRule {
        relationship_type: RelationshipType::Uses,
        from_roles: &[
            EntityType::Person,
            EntityType::Project,
            EntityType::Service,
            EntityType::Api,
            EntityType::Organization,
        ],
        to_roles: &[
            EntityType::Technology,
            EntityType::Database,
            EntityType::Api,
            EntityType::Service,
        ],
    },
    DirectionRule {
        relationship_type: RelationshipType::WorksOn,
        from_roles: ACTORS,
        to_roles: &[
            EntityType::Project,
            EntityType::Technology,
            EntityType::Api,
            EntityType::Service,
            EntityType::File,
            EntityType::Repository,
            EntityType::Document,
        ],
    },
    DirectionRule {
        relationship_type: RelationshipType::DependsOn,
        from_roles: &[
            EntityType::Project,
            EntityType::Service,
            EntityType::Api,
            EntityType::Technology,
            EntityType::File,
        ],
        to_roles: &[
            EntityType::Technology,
            EntityType::Database,
            EntityType::Service,
            EntityType::Api,
            EntityType::File,
        ],
    },
    DirectionRule {
        relationship_type: RelationshipType::Calls,
        from_roles: &[EntityType::Service, EntityType::Api],
        to_roles: &[EntityType::Api, EntityType::Service],
    },
    DirectionRule {
        relationship_type: RelationshipType::Implements,
        from_roles: &[
            EntityType::Service,
            EntityType::Api,
            EntityType::File,
            EntityType::Project,
            EntityType::Technology,
        ],
        to_roles: &[EntityType::Concept, EntityType::Document],
    },
    DirectionRule {
        relationship_type: RelationshipType::Contains,
        from_roles: &[
            EntityType::Project,
            EntityType::Repository,
            EntityType::Organization,
        ],
        to_roles: &[
            EntityType::File,
            EntityType::Document,
            EntityType::Service,
            EntityType::Api,
        ],
    },
    DirectionRule {
        relationship_type: RelationshipType::Manages,
        from_roles: ACTORS,
        to_roles: &[
            EntityType::Project,
            EntityType::Service,
            EntityType::Api,
            EntityType::Repository,
            EntityType::Person,
        ],
    },
];

/// The direction rule for an archetype, when one exists. `Extends` and
/// `CollaboratesWith` have no canonical roles and fall back to mention order.
pub fn direction_rule(relationship_type: RelationshipType) -> Option<&'static DirectionRule> {
    DIRECTION_RULES
        .iter()
        .find(|rule| rule.relationship_type == relationship_type)
}

// ============================================================================
// Type Priors (Strategy B)
// ============================================================================

/// A relationship implied by an entity-type pairing alone. Direction is the
/// table row's: `from_type` flows to `to_type`.
pub struct TypePrior {
    pub from_type: EntityType,
    pub to_type: EntityType,
    pub relationship_type: RelationshipType,
    pub strength: f32,
}

const fn prior(
    from_type: EntityType,
    to_type: EntityType,
    relationship_type: RelationshipType,
    strength: f32,
) -> TypePrior {
    TypePrior {
        from_type,
        to_type,
        relationship_type,
        strength,
    }
}

static TYPE_PRIORS: &[TypePrior] = &[
    prior(
        EntityType::Project,
        EntityType::Technology,
        RelationshipType::Uses,
        0.6,
    ),
    prior(
        EntityType::Project,
        EntityType::File,
        RelationshipType::Contains,
        0.7,
    ),
    prior(
        EntityType::Project,
        EntityType::Database,
        RelationshipType::Uses,
        0.6,
    ),
    prior(
        EntityType::Person,
        EntityType::Organization,
        RelationshipType::BelongsTo,
        0.7,
    ),
    prior(
        EntityType::Person,
        EntityType::Project,
        RelationshipType::WorksOn,
        0.6,
    ),
    prior(
        EntityType::Api,
        EntityType::Database,
        RelationshipType::Uses,
        0.6,
    ),
    prior(
        EntityType::Service,
        EntityType::Database,
        RelationshipType::Uses,
        0.6,
    ),
    prior(
        EntityType::Api,
        EntityType::Service,
        RelationshipType::BelongsTo,
        0.6,
    ),
    prior(
        EntityType::File,
        EntityType::Repository,
        RelationshipType::BelongsTo,
        0.7,
    ),
    prior(
        EntityType::Service,
        EntityType::Technology,
        RelationshipType::Uses,
        0.6,
    ),
    prior(
        EntityType::Concept,
        EntityType::Technology,
        RelationshipType::RelatedTo,
        0.4,
    ),
];

/// Find the prior for an unordered type pair. The boolean reports whether
/// `a` takes the row's from-side.
pub fn prior_for(a: EntityType, b: EntityType) -> Option<(&'static TypePrior, bool)> {
    for row in TYPE_PRIORS {
        if row.from_type == a && row.to_type == b {
            return Some((row, true));
        }
        if row.from_type == b && row.to_type == a {
            return Some((row, false));
        }
    }
    None
}
