/// Separator between instance and port in a port address (`"ToneMapper.dst"`)
pub const PORT_ADDRESS_SEPARATOR: char = '.';
/// Data kind that connects to any other data kind
pub const ANY_DATA_KIND: &str = "*";
/// Data kind given to ports declared without one
pub const DEFAULT_DATA_KIND: &str = "texture";
/// Priority assumed for passes that declare no priority hint
pub const DEFAULT_PRIORITY: i32 = 0;
