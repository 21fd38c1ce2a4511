//! Life displays
//!
//! Two read-only views of the lives counter, reconciled every frame: a row
//! of heart icons and a coloured digit.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::counter::Counter;
use super::rect::Rect;
use crate::consts::*;

/// Digit colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeColor {
    Green,
    Yellow,
    Red,
}

impl LifeColor {
    pub fn for_lives(lives: i32) -> Self {
        match lives {
            3.. => LifeColor::Green,
            2 => LifeColor::Yellow,
            _ => LifeColor::Red,
        }
    }
}

/// Row of heart icons, one per remaining life
#[derive(Debug, Clone)]
pub struct GraphicLifeCounter {
    /// One slot per possible life, left to right
    icons: Vec<Rect>,
    visible: usize,
}

impl GraphicLifeCounter {
    pub fn new(origin: Vec2, icon_size: Vec2, max_lives: i32, lives: &Counter) -> Self {
        let icons = (0..max_lives.max(0))
            .map(|i| Rect::new(origin + Vec2::new(i as f32 * icon_size.x, 0.0), icon_size))
            .collect();
        let mut counter = Self { icons, visible: 0 };
        counter.reconcile(lives);
        counter
    }

    pub fn reconcile(&mut self, lives: &Counter) {
        self.visible = (lives.value().max(0) as usize).min(self.icons.len());
    }

    /// Icons currently shown
    pub fn visible_icons(&self) -> &[Rect] {
        &self.icons[..self.visible]
    }
}

/// Lives as a coloured number
#[derive(Debug, Clone)]
pub struct NumericLifeCounter {
    pub rect: Rect,
    text: String,
    color: LifeColor,
}

impl NumericLifeCounter {
    pub fn new(rect: Rect, lives: &Counter) -> Self {
        let mut counter = Self {
            rect,
            text: String::new(),
            color: LifeColor::Green,
        };
        counter.reconcile(lives);
        counter
    }

    pub fn reconcile(&mut self, lives: &Counter) {
        let value = lives.value().max(0);
        if self.text.parse::<i32>().ok() != Some(value) {
            self.text = value.to_string();
        }
        self.color = LifeColor::for_lives(value);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn color(&self) -> LifeColor {
        self.color
    }
}

/// Both life displays, anchored to the bottom-left corner
#[derive(Debug, Clone)]
pub struct LifeDisplays {
    pub graphic: GraphicLifeCounter,
    pub numeric: NumericLifeCounter,
}

impl LifeDisplays {
    pub fn new(window: Vec2, max_lives: i32, lives: &Counter) -> Self {
        let hearts_origin = Vec2::new(BORDER_SIZE, window.y - MIN_DIST - HEART_SIZE);
        let digit_origin = Vec2::new(
            BORDER_SIZE + HEART_SIZE * max_lives.max(0) as f32,
            window.y - MIN_DIST,
        );
        Self {
            graphic: GraphicLifeCounter::new(
                hearts_origin,
                Vec2::splat(HEART_SIZE),
                max_lives,
                lives,
            ),
            numeric: NumericLifeCounter::new(
                Rect::new(digit_origin, Vec2::splat(DIGIT_TEXT_SIZE)),
                lives,
            ),
        }
    }

    pub fn reconcile(&mut self, lives: &Counter) {
        self.graphic.reconcile(lives);
        self.numeric.reconcile(lives);
    }
}
