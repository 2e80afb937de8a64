fn main() {
    validatehub_lib::run()
}
