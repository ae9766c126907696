mod bounding_box_predicates;
mod hierarchy_layout;
mod overlap_searches;
