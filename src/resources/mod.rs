/**
 * This module contains all logic for loading textures from external files.
 */
pub mod texture;
