mod layouts;
mod neighbor_tests;
mod planner_tests;
mod restore_tests;
mod store_tests;
