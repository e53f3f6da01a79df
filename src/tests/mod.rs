use fixture::Fixture;


mod dnd;
