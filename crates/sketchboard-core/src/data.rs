//! Scene data: the ordered element list.

use crate::element::{Element, ElementId, new_element_id};
use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A scene. Array order is z-order with the front-most element first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Data {
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Data {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a scene from JSON.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the scene to JSON.
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize the scene to indented JSON.
    pub fn to_json_pretty(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Normalize loaded data: every element gets a unique uuid and a
    /// non-negative, finite geometry.
    pub fn init(mut self) -> Self {
        let mut seen = HashSet::new();
        for elem in &mut self.elements {
            if elem.uuid.is_empty() || seen.contains(&elem.uuid) {
                let id = new_element_id();
                log::debug!("Assigning uuid {} to element {:?}", id, elem.uuid);
                elem.uuid = id;
            }
            seen.insert(elem.uuid.clone());

            for value in [&mut elem.x, &mut elem.y, &mut elem.angle] {
                if !value.is_finite() {
                    *value = 0.0;
                }
            }
            for size in [&mut elem.w, &mut elem.h] {
                if !size.is_finite() || *size < 0.0 {
                    *size = 0.0;
                }
            }
        }
        self
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Index of an element in z-order (0 = front-most).
    pub fn find_index(&self, uuid: &str) -> Option<usize> {
        self.elements.iter().position(|e| e.uuid == uuid)
    }

    pub fn get(&self, uuid: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.uuid == uuid)
    }

    pub fn get_mut(&mut self, uuid: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.uuid == uuid)
    }

    /// Add an element in front of all others. Returns its uuid.
    pub fn add_element(&mut self, mut elem: Element) -> ElementId {
        if elem.uuid.is_empty() || self.find_index(&elem.uuid).is_some() {
            elem.uuid = new_element_id();
        }
        let id = elem.uuid.clone();
        self.elements.insert(0, elem);
        id
    }

    /// Replace the element with the same uuid, keeping its z-position.
    pub fn update_element(&mut self, elem: Element) -> CoreResult<()> {
        let index = self
            .find_index(&elem.uuid)
            .ok_or_else(|| CoreError::ElementNotFound(elem.uuid.clone()))?;
        self.elements[index] = elem;
        Ok(())
    }

    /// Remove an element by uuid.
    pub fn delete_element(&mut self, uuid: &str) -> CoreResult<Element> {
        let index = self
            .find_index(uuid)
            .ok_or_else(|| CoreError::ElementNotFound(uuid.to_string()))?;
        Ok(self.elements.remove(index))
    }

    /// Move an element one step towards the front.
    /// Returns false if it already is front-most or does not exist.
    pub fn move_up(&mut self, uuid: &str) -> bool {
        match self.find_index(uuid) {
            Some(index) if index > 0 => {
                self.elements.swap(index, index - 1);
                true
            }
            _ => false,
        }
    }

    /// Move an element one step towards the back.
    pub fn move_down(&mut self, uuid: &str) -> bool {
        match self.find_index(uuid) {
            Some(index) if index + 1 < self.elements.len() => {
                self.elements.swap(index, index + 1);
                true
            }
            _ => false,
        }
    }

    /// Bring an element in front of all others.
    pub fn move_to_front(&mut self, uuid: &str) -> bool {
        match self.find_index(uuid) {
            Some(index) if index > 0 => {
                let elem = self.elements.remove(index);
                self.elements.insert(0, elem);
                true
            }
            _ => false,
        }
    }

    /// Send an element behind all others.
    pub fn move_to_back(&mut self, uuid: &str) -> bool {
        match self.find_index(uuid) {
            Some(index) if index + 1 < self.elements.len() => {
                let elem = self.elements.remove(index);
                self.elements.push(elem);
                true
            }
            _ => false,
        }
    }
}
