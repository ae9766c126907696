extern crate nalgebra as na;

mod geometry;
