// Smart Health AI — Entry Point

fn main() {
    smart_health_lib::run();
}
