//! Layered entity registry
//!
//! Active entities, stored per kind and sorted by id so iteration order is
//! stable. Bricks sit on the static layer; everything that moves sits on the
//! default layer.

use super::entities::{Ball, Brick, DroppingHeart, EntityId, Paddle, Tag, Wall};
use super::rect::Rect;

/// Collection layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Bricks: never move, only collide with balls
    StaticObjects,
    Default,
}

impl Layer {
    /// Layer an entity carrying `tag` lives on
    pub fn of(tag: Tag) -> Self {
        match tag {
            Tag::Brick => Layer::StaticObjects,
            _ => Layer::Default,
        }
    }
}

/// An entity being added to the registry
#[derive(Debug, Clone)]
pub enum Entity {
    Brick(Brick),
    Ball(Ball),
    Paddle(Paddle),
    Heart(DroppingHeart),
    Wall(Wall),
}

impl Entity {
    pub fn id(&self) -> EntityId {
        match self {
            Entity::Brick(b) => b.id,
            Entity::Ball(b) => b.id,
            Entity::Paddle(p) => p.id,
            Entity::Heart(h) => h.id,
            Entity::Wall(w) => w.id,
        }
    }
}

/// Read-only view of one active entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityView {
    pub id: EntityId,
    pub tag: Tag,
    pub layer: Layer,
    pub rect: Rect,
}

impl EntityView {
    fn new(id: EntityId, tag: Tag, rect: Rect) -> Self {
        Self {
            id,
            tag,
            layer: Layer::of(tag),
            rect,
        }
    }
}

/// All active entities of one level
#[derive(Debug, Clone)]
pub struct Registry {
    pub bricks: Vec<Brick>,
    pub balls: Vec<Ball>,
    pub paddles: Vec<Paddle>,
    pub hearts: Vec<DroppingHeart>,
    pub walls: Vec<Wall>,
    next_id: EntityId,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self {
            bricks: Vec::new(),
            balls: Vec::new(),
            paddles: Vec::new(),
            hearts: Vec::new(),
            walls: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add an entity to its layer. Returns its id.
    pub fn add(&mut self, entity: Entity) -> EntityId {
        let id = entity.id();
        match entity {
            Entity::Brick(b) => self.bricks.push(b),
            Entity::Ball(b) => self.balls.push(b),
            Entity::Paddle(p) => self.paddles.push(p),
            Entity::Heart(h) => self.hearts.push(h),
            Entity::Wall(w) => self.walls.push(w),
        }
        id
    }

    /// Remove an entity from whichever layer holds it. Returns false if it
    /// was not active, so removing twice is harmless.
    pub fn remove(&mut self, id: EntityId) -> bool {
        fn take<T>(items: &mut Vec<T>, id: EntityId, id_of: impl Fn(&T) -> EntityId) -> bool {
            match items.iter().position(|item| id_of(item) == id) {
                Some(index) => {
                    items.remove(index);
                    true
                }
                None => false,
            }
        }

        take(&mut self.bricks, id, |b| b.id)
            || take(&mut self.balls, id, |b| b.id)
            || take(&mut self.paddles, id, |p| p.id)
            || take(&mut self.hearts, id, |h| h.id)
            || take(&mut self.walls, id, |w| w.id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.iter().any(|e| e.id == id)
    }

    /// Iterate over every active entity, static layer first
    pub fn iter(&self) -> impl Iterator<Item = EntityView> + '_ {
        let bricks = self.bricks.iter().map(|b| EntityView::new(b.id, Tag::Brick, b.rect));
        let balls = self.balls.iter().map(|b| EntityView::new(b.id, b.tag(), b.rect));
        let paddles = self.paddles.iter().map(|p| EntityView::new(p.id, p.tag(), p.rect));
        let hearts = self.hearts.iter().map(|h| EntityView::new(h.id, Tag::DroppingHeart, h.rect));
        let walls = self.walls.iter().map(|w| EntityView::new(w.id, Tag::Wall, w.rect));
        bricks.chain(balls).chain(paddles).chain(hearts).chain(walls)
    }

    /// Owned snapshot of the active entities
    pub fn snapshot(&self) -> Vec<EntityView> {
        self.iter().collect()
    }

    /// Number of active entities carrying `tag`
    pub fn count_tag(&self, tag: Tag) -> usize {
        self.iter().filter(|e| e.tag == tag).count()
    }

    /// First active entity carrying `tag`
    pub fn find_tag(&self, tag: Tag) -> Option<EntityView> {
        self.iter().find(|e| e.tag == tag)
    }

    pub fn ball(&self, id: EntityId) -> Option<&Ball> {
        self.balls.iter().find(|b| b.id == id)
    }

    pub fn ball_mut(&mut self, id: EntityId) -> Option<&mut Ball> {
        self.balls.iter_mut().find(|b| b.id == id)
    }

    pub fn brick(&self, id: EntityId) -> Option<&Brick> {
        self.bricks.iter().find(|b| b.id == id)
    }

    pub fn brick_mut(&mut self, id: EntityId) -> Option<&mut Brick> {
        self.bricks.iter_mut().find(|b| b.id == id)
    }

    pub fn paddle(&self, id: EntityId) -> Option<&Paddle> {
        self.paddles.iter().find(|p| p.id == id)
    }

    pub fn paddle_mut(&mut self, id: EntityId) -> Option<&mut Paddle> {
        self.paddles.iter_mut().find(|p| p.id == id)
    }

    /// Ensure collections are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.bricks.sort_by_key(|b| b.id);
        self.balls.sort_by_key(|b| b.id);
        self.paddles.sort_by_key(|p| p.id);
        self.hearts.sort_by_key(|h| h.id);
    }
}
