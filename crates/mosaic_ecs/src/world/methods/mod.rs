mod arche;
mod despawn;
mod fetch;
mod insert;
mod register;
mod remove;
mod spawn;
