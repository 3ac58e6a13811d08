mod bitset;
mod selection;
