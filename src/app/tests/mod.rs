mod page_flow;
mod terminal_surface;
